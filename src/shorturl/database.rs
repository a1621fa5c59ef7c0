//! Storage gateway for short links
//!
//! Layout inside the redb file:
//!
//! - `urls`: link id -> JSON-serialized `ShortLink`
//! - `urls_short_id_idx`: short ID -> link id, the uniqueness constraint
//! - `sequences`: shared id counters (see `crate::database`)
//!
//! Every method opens its own transaction and drops it before returning.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::database::{decode, next_id, open_database, TABLE_SEQUENCES};
use crate::error::StoreError;
use crate::shorturl::model::ShortLink;

const URLS: &str = "urls";

/// Main table for link records
///
/// Key: link id
/// Value: '{"id":1,"short_id":"aZ3k9Q","full_url":"https://example.com",...}'
pub const TABLE_URLS: TableDefinition<u64, &str> = TableDefinition::new(URLS);

/// Unique index on `short_id`
pub const TABLE_SHORT_ID_INDEX: TableDefinition<&str, u64> =
    TableDefinition::new("urls_short_id_idx");

#[derive(Clone)]
pub struct UrlStore {
    db: Arc<Database>,
}

/// Opens the store at `db_path` and makes sure its tables exist
///
/// # Example
///
/// ```no_run
/// # use mini_services::shorturl::database::init_db;
/// let store = init_db(std::path::Path::new("data/urls.db")).expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &Path) -> Result<UrlStore, StoreError> {
    let store = UrlStore {
        db: Arc::new(open_database(db_path)?),
    };
    store.ensure_schema()?;
    Ok(store)
}

impl UrlStore {
    /// Creates any missing table. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            write_txn.open_table(TABLE_URLS)?;
            write_txn.open_table(TABLE_SHORT_ID_INDEX)?;
            write_txn.open_table(TABLE_SEQUENCES)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Whether `short_id` is already assigned to a link
    pub fn short_id_exists(&self, short_id: &str) -> Result<bool, StoreError> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(TABLE_SHORT_ID_INDEX)?;
        let exists = index.get(short_id)?.is_some();
        Ok(exists)
    }

    /// Persists a new link
    ///
    /// Fails with `StoreError::UniqueViolation` if `short_id` is taken, even
    /// when the caller checked beforehand.
    pub fn insert(&self, short_id: &str, full_url: &str) -> Result<ShortLink, StoreError> {
        // Begin a write transaction; the uniqueness check and the insert
        // happen inside it
        let write_txn = self.db.begin_write()?;
        let link = {
            // Check if the short ID is already taken
            let mut index = write_txn.open_table(TABLE_SHORT_ID_INDEX)?;
            if index.get(short_id)?.is_some() {
                return Err(StoreError::UniqueViolation {
                    table: URLS,
                    column: "short_id",
                    value: short_id.to_string(),
                });
            }

            let link = ShortLink {
                id: next_id(&write_txn, URLS)?,
                short_id: short_id.to_string(),
                full_url: full_url.to_string(),
                created_at: Utc::now(),
            };
            let record_json = serde_json::to_string(&link)?;

            // Insert the record into the main table, then claim the short ID
            let mut urls = write_txn.open_table(TABLE_URLS)?;
            urls.insert(link.id, record_json.as_str())?;
            index.insert(short_id, link.id)?;
            link
        };

        // Commit the transaction to persist the link and its index entry
        write_txn.commit()?;

        Ok(link)
    }

    /// Looks a link up by its public short ID
    pub fn select_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(TABLE_SHORT_ID_INDEX)?;

        // Resolve the short ID to the row id first
        let id = match index.get(short_id)? {
            Some(guard) => guard.value(),
            None => return Ok(None),
        };

        let urls = read_txn.open_table(TABLE_URLS)?;
        let link = match urls.get(id)? {
            Some(guard) => Some(decode::<ShortLink>(guard.value())?),
            None => None,
        };
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (UrlStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = init_db(&dir.path().join("urls.db")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_insert_and_lookup() {
        let (store, _dir) = store();

        let link = store.insert("abc123", "https://example.com").unwrap();
        assert_eq!(link.id, 1);

        let found = store.select_by_short_id("abc123").unwrap().unwrap();
        assert_eq!(found, link);
        assert!(store.short_id_exists("abc123").unwrap());
    }

    #[test]
    fn test_missing_short_id_is_not_an_error() {
        let (store, _dir) = store();

        assert_eq!(store.select_by_short_id("nope00").unwrap(), None);
        assert!(!store.short_id_exists("nope00").unwrap());
    }

    #[test]
    fn test_duplicate_short_id_is_rejected() {
        let (store, _dir) = store();
        store.insert("dup001", "https://first.example").unwrap();

        let err = store.insert("dup001", "https://second.example").unwrap_err();
        assert!(matches!(
            err,
            StoreError::UniqueViolation { column: "short_id", .. }
        ));

        let kept = store.select_by_short_id("dup001").unwrap().unwrap();
        assert_eq!(kept.full_url, "https://first.example");
    }

    #[test]
    fn test_ids_increase() {
        let (store, _dir) = store();

        let a = store.insert("aaaaaa", "https://a.example").unwrap();
        let b = store.insert("bbbbbb", "https://b.example").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let (store, _dir) = store();
        store.insert("keep01", "https://keep.example").unwrap();

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        assert!(store.short_id_exists("keep01").unwrap());
    }
}
