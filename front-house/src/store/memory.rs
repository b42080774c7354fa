//! In-memory store used by unit tests

use super::{Collection, StorageResult, Store, ledger_key};
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;

/// HashMap-backed store, nothing touches disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a collection with arbitrary bytes (corruption tests)
    pub fn put_raw(&self, collection: Collection, bytes: Vec<u8>) {
        self.entries
            .write()
            .insert(collection_key(collection), bytes);
    }
}

fn collection_key(collection: Collection) -> String {
    format!("collection:{}", collection.key())
}

fn ledger_entry_key(date: NaiveDate) -> String {
    format!("ledger:{}", ledger_key(date))
}

impl Store for MemoryStore {
    fn load_collection(&self, collection: Collection) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(&collection_key(collection)).cloned())
    }

    fn save_collections(&self, writes: &[(Collection, Vec<u8>)]) -> StorageResult<()> {
        let mut entries = self.entries.write();
        for (collection, bytes) in writes {
            entries.insert(collection_key(*collection), bytes.clone());
        }
        Ok(())
    }

    fn load_ledger(&self, date: NaiveDate) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(&ledger_entry_key(date)).cloned())
    }

    fn save_ledger_raw(&self, date: NaiveDate, bytes: Vec<u8>) -> StorageResult<()> {
        self.entries.write().insert(ledger_entry_key(date), bytes);
        Ok(())
    }
}
