//! redb-based store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `collections` | collection name | JSON list | users / tables / dishes / orders |
//! | `daily_ledger` | `YYYY-MM-DD` | `DailyLedgerEntry` | Per-day revenue accumulator |
//!
//! # Durability
//!
//! redb commits are durable once `commit()` returns (copy-on-write with an
//! atomic root swap), so a crash never leaves a half-written collection.

use super::{Collection, StorageResult, Store, ledger_key};
use chrono::NaiveDate;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// key = collection name, value = JSON-serialized record list
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// key = ISO date, value = JSON-serialized DailyLedgerEntry
const LEDGER_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("daily_ledger");

/// Store backed by an embedded redb database
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, demos)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
            let _ = write_txn.open_table(LEDGER_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl Store for RedbStore {
    fn load_collection(&self, collection: Collection) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        let bytes = table
            .get(collection.key())?
            .map(|value| value.value().to_vec());
        Ok(bytes)
    }

    fn save_collections(&self, writes: &[(Collection, Vec<u8>)]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            for (collection, bytes) in writes {
                table.insert(collection.key(), bytes.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    fn load_ledger(&self, date: NaiveDate) -> StorageResult<Option<Vec<u8>>> {
        let key = ledger_key(date);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LEDGER_TABLE)?;
        let bytes = table.get(key.as_str())?.map(|value| value.value().to_vec());
        Ok(bytes)
    }

    fn save_ledger_raw(&self, date: NaiveDate, bytes: Vec<u8>) -> StorageResult<()> {
        let key = ledger_key(date);
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LEDGER_TABLE)?;
            table.insert(key.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
