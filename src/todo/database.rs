//! Storage gateway for to-do items
//!
//! Items live in the `todos` table keyed by id, so iterating the table
//! yields them in ascending id order. Ids come from the `sequences` table.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::database::{decode, next_id, open_database, TABLE_SEQUENCES};
use crate::error::StoreError;
use crate::todo::model::{NewTodo, TodoItem};
use crate::todo::patch::{merge, TodoPatch};

const TODOS: &str = "todos";

/// Key: item id
/// Value: '{"id":1,"title":"Buy milk","description":null,"completed":false}'
pub const TABLE_TODOS: TableDefinition<u64, &str> = TableDefinition::new(TODOS);

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: TodoStore,
}

#[derive(Clone)]
pub struct TodoStore {
    db: Arc<Database>,
}

/// Result of a partial update on an existing item
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub item: TodoItem,
    /// False when the patch left the record as it was and nothing was written
    pub written: bool,
}

/// Opens the store at `db_path` and makes sure its tables exist
pub fn init_db(db_path: &Path) -> Result<TodoStore, StoreError> {
    let store = TodoStore {
        db: Arc::new(open_database(db_path)?),
    };
    store.ensure_schema()?;
    Ok(store)
}

impl TodoStore {
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            write_txn.open_table(TABLE_TODOS)?;
            write_txn.open_table(TABLE_SEQUENCES)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn insert(&self, new: &NewTodo) -> Result<TodoItem, StoreError> {
        // Begin a write transaction; the id bump and the row land together
        let write_txn = self.db.begin_write()?;
        let item = {
            let item = TodoItem {
                id: next_id(&write_txn, TODOS)?,
                title: new.title.clone(),
                description: new.description.clone(),
                completed: new.completed,
            };
            let record_json = serde_json::to_string(&item)?;

            let mut table = write_txn.open_table(TABLE_TODOS)?;
            table.insert(item.id, record_json.as_str())?;
            item
        };

        // Commit the transaction to persist the item
        write_txn.commit()?;

        Ok(item)
    }

    pub fn select_by_id(&self, id: u64) -> Result<Option<TodoItem>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_TODOS)?;

        let item = match table.get(id)? {
            Some(guard) => Some(decode::<TodoItem>(guard.value())?),
            None => None,
        };
        Ok(item)
    }

    /// All items, ascending by id
    pub fn select_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_TODOS)?;

        let mut items = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            items.push(decode::<TodoItem>(value.value())?);
        }
        Ok(items)
    }

    /// Applies `patch` to item `id` inside one write transaction
    ///
    /// Returns `Ok(None)` when the item does not exist. When the merge leaves
    /// the record unchanged (including an empty patch) the transaction is
    /// dropped without committing, so nothing is written.
    pub fn update_fields(&self, id: u64, patch: &TodoPatch) -> Result<Option<Merged>, StoreError> {
        let write_txn = self.db.begin_write()?;
        let merged = {
            let mut table = write_txn.open_table(TABLE_TODOS)?;

            // Load the current record; unknown ids end here
            let existing = match table.get(id)? {
                Some(guard) => decode::<TodoItem>(guard.value())?,
                None => return Ok(None),
            };

            let merged = merge(&existing, patch);

            // Nothing changed: drop the transaction without writing
            if merged == existing {
                return Ok(Some(Merged {
                    item: existing,
                    written: false,
                }));
            }

            // Overwrite the row with the merged state
            let record_json = serde_json::to_string(&merged)?;
            table.insert(id, record_json.as_str())?;
            merged
        };
        write_txn.commit()?;

        Ok(Some(Merged {
            item: merged,
            written: true,
        }))
    }

    /// Removes item `id`; returns whether it existed
    pub fn delete_by_id(&self, id: u64) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        let mut table = write_txn.open_table(TABLE_TODOS)?;
        let removed = table.remove(id)?.is_some();

        // The table borrows the transaction; release it before committing
        drop(table);

        // Only commit when a row actually went away
        if removed {
            write_txn.commit()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TodoStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = init_db(&dir.path().join("todos.db")).unwrap();
        (store, dir)
    }

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: None,
            completed: false,
        }
    }

    fn patch(value: serde_json::Value) -> TodoPatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_insert_and_select() {
        let (store, _dir) = store();

        let item = store.insert(&new_todo("Buy milk")).unwrap();
        assert_eq!(item.id, 1);
        assert!(!item.completed);

        assert_eq!(store.select_by_id(item.id).unwrap(), Some(item));
    }

    #[test]
    fn test_select_all_is_ordered_by_id() {
        let (store, _dir) = store();
        for title in ["one", "two", "three", "four"] {
            store.insert(&new_todo(title)).unwrap();
        }

        let ids: Vec<u64> = store.select_all().unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_patch_does_not_write() {
        let (store, _dir) = store();
        let item = store.insert(&new_todo("A")).unwrap();

        let merged = store.update_fields(item.id, &TodoPatch::default()).unwrap().unwrap();

        assert!(!merged.written);
        assert_eq!(merged.item, item);
    }

    #[test]
    fn test_same_values_do_not_write() {
        let (store, _dir) = store();
        let item = store.insert(&new_todo("A")).unwrap();

        let merged = store
            .update_fields(item.id, &patch(json!({ "title": "A", "completed": false })))
            .unwrap()
            .unwrap();

        assert!(!merged.written);
    }

    #[test]
    fn test_patch_is_persisted() {
        let (store, _dir) = store();
        let item = store
            .insert(&NewTodo {
                title: "A".to_string(),
                description: Some("d".to_string()),
                completed: false,
            })
            .unwrap();

        let merged = store
            .update_fields(item.id, &patch(json!({ "completed": true })))
            .unwrap()
            .unwrap();
        assert!(merged.written);

        let stored = store.select_by_id(item.id).unwrap().unwrap();
        assert_eq!(stored.title, "A");
        assert_eq!(stored.description.as_deref(), Some("d"));
        assert!(stored.completed);
    }

    #[test]
    fn test_unknown_id_is_not_found_everywhere() {
        let (store, _dir) = store();

        assert_eq!(store.select_by_id(42).unwrap(), None);
        assert_eq!(
            store.update_fields(42, &patch(json!({ "title": "x" }))).unwrap(),
            None
        );
        assert!(!store.delete_by_id(42).unwrap());
    }

    #[test]
    fn test_delete_is_terminal_and_ids_are_not_reused() {
        let (store, _dir) = store();
        let first = store.insert(&new_todo("first")).unwrap();

        assert!(store.delete_by_id(first.id).unwrap());
        assert_eq!(store.select_by_id(first.id).unwrap(), None);
        assert!(!store.delete_by_id(first.id).unwrap());

        let second = store.insert(&new_todo("second")).unwrap();
        assert!(second.id > first.id);
    }
}
