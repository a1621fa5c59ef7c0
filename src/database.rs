//! Storage plumbing shared by both services
//!
//! Each service keeps its records in its own embedded redb file. Records are
//! stored as JSON strings keyed by a numeric id, and ids are handed out from
//! a persisted per-table sequence so that a deleted id is never reused.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition, WriteTransaction};
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Last id handed out per table
///
/// Key: table name (e.g. "todos")
/// Value: highest id ever assigned in that table
pub const TABLE_SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Creates the parent directory of `db_path` if needed, then creates or opens
/// the database file.
///
/// This runs once at startup. The returned handle is shared by every request;
/// requests only ever hold transactions on it.
pub fn open_database(db_path: &Path) -> Result<Database, StoreError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    Ok(Database::create(db_path)?)
}

/// Reserves the next id for `table` inside the given write transaction
///
/// The bump is only persisted if the caller commits, so an aborted insert
/// does not burn an id.
pub fn next_id(write_txn: &WriteTransaction, table: &str) -> Result<u64, StoreError> {
    let mut sequences = write_txn.open_table(TABLE_SEQUENCES)?;
    let last = sequences.get(table)?.map(|guard| guard.value()).unwrap_or(0);
    let next = last + 1;
    sequences.insert(table, next)?;
    Ok(next)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, StoreError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.db");

        open_database(&path).expect("database should open");

        assert!(path.exists());
    }

    #[test]
    fn test_sequence_only_advances_on_commit() {
        let dir = TempDir::new().unwrap();
        let db = open_database(&dir.path().join("seq.db")).unwrap();

        let txn = db.begin_write().unwrap();
        assert_eq!(next_id(&txn, "things").unwrap(), 1);
        txn.abort().unwrap();

        let txn = db.begin_write().unwrap();
        assert_eq!(next_id(&txn, "things").unwrap(), 1);
        assert_eq!(next_id(&txn, "things").unwrap(), 2);
        assert_eq!(next_id(&txn, "others").unwrap(), 1);
        txn.commit().unwrap();

        let txn = db.begin_write().unwrap();
        assert_eq!(next_id(&txn, "things").unwrap(), 3);
    }
}
