//! Persistent store
//!
//! Four named collections (users, tables, dishes, orders), each persisted as
//! one JSON list, plus one ledger entry per calendar day.
//!
//! Backends implement the raw byte operations; the typed accessors are
//! provided by the trait and fail closed: a collection whose bytes do not
//! decode is logged and read as empty.

pub mod memory;
pub mod redb_store;
pub mod seed;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use seed::seed_defaults;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{DailyLedgerEntry, DiningTable, Dish, Order, User};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Named record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Tables,
    Dishes,
    Orders,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Tables,
        Collection::Dishes,
        Collection::Orders,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Tables => "tables",
            Collection::Dishes => "dishes",
            Collection::Orders => "orders",
        }
    }
}

/// Ledger key: ISO calendar date
pub fn ledger_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Store backend
pub trait Store: Send + Sync {
    /// Raw bytes of a collection, `None` when never written
    fn load_collection(&self, collection: Collection) -> StorageResult<Option<Vec<u8>>>;

    /// Write several collections in one atomic commit
    fn save_collections(&self, writes: &[(Collection, Vec<u8>)]) -> StorageResult<()>;

    /// Raw bytes of a day's ledger entry
    fn load_ledger(&self, date: NaiveDate) -> StorageResult<Option<Vec<u8>>>;

    fn save_ledger_raw(&self, date: NaiveDate, bytes: Vec<u8>) -> StorageResult<()>;

    // ========== Typed accessors ==========

    fn has_collection(&self, collection: Collection) -> StorageResult<bool> {
        Ok(self.load_collection(collection)?.is_some())
    }

    fn users(&self) -> StorageResult<Vec<User>> {
        decode_collection(Collection::Users, self.load_collection(Collection::Users)?)
    }

    fn tables(&self) -> StorageResult<Vec<DiningTable>> {
        decode_collection(Collection::Tables, self.load_collection(Collection::Tables)?)
    }

    fn dishes(&self) -> StorageResult<Vec<Dish>> {
        decode_collection(Collection::Dishes, self.load_collection(Collection::Dishes)?)
    }

    fn orders(&self) -> StorageResult<Vec<Order>> {
        decode_collection(Collection::Orders, self.load_collection(Collection::Orders)?)
    }

    fn save_users(&self, users: &[User]) -> StorageResult<()> {
        self.save_collections(&[(Collection::Users, encode(users)?)])
    }

    fn save_tables(&self, tables: &[DiningTable]) -> StorageResult<()> {
        self.save_collections(&[(Collection::Tables, encode(tables)?)])
    }

    fn save_dishes(&self, dishes: &[Dish]) -> StorageResult<()> {
        self.save_collections(&[(Collection::Dishes, encode(dishes)?)])
    }

    fn save_orders(&self, orders: &[Order]) -> StorageResult<()> {
        self.save_collections(&[(Collection::Orders, encode(orders)?)])
    }

    /// Table state and its orders change together when a table is freed
    fn save_tables_and_orders(
        &self,
        tables: &[DiningTable],
        orders: &[Order],
    ) -> StorageResult<()> {
        self.save_collections(&[
            (Collection::Tables, encode(tables)?),
            (Collection::Orders, encode(orders)?),
        ])
    }

    /// Ledger entry for a day (empty when nothing was billed yet)
    fn ledger(&self, date: NaiveDate) -> StorageResult<DailyLedgerEntry> {
        let Some(bytes) = self.load_ledger(date)? else {
            return Ok(DailyLedgerEntry::empty(date));
        };
        match serde_json::from_slice::<DailyLedgerEntry>(&bytes) {
            Ok(entry) => Ok(entry),
            Err(e) => {
                tracing::warn!(date = %date, error = %e, "Corrupt ledger entry, reading as empty");
                Ok(DailyLedgerEntry::empty(date))
            }
        }
    }

    fn save_ledger(&self, entry: &DailyLedgerEntry) -> StorageResult<()> {
        self.save_ledger_raw(entry.date, serde_json::to_vec(entry)?)
    }
}

fn encode<T: Serialize>(records: &[T]) -> StorageResult<Vec<u8>> {
    Ok(serde_json::to_vec(records)?)
}

fn decode_collection<T: DeserializeOwned>(
    collection: Collection,
    bytes: Option<Vec<u8>>,
) -> StorageResult<Vec<T>> {
    let Some(bytes) = bytes else {
        return Ok(Vec::new());
    };
    match serde_json::from_slice(&bytes) {
        Ok(records) => Ok(records),
        Err(e) => {
            tracing::warn!(
                collection = collection.key(),
                error = %e,
                "Corrupt collection, reading as empty"
            );
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableStatus;

    #[test]
    fn test_absent_collection_reads_empty() {
        let store = MemoryStore::new();
        assert!(!store.has_collection(Collection::Tables).unwrap());
        assert!(store.tables().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_collection_fails_closed() {
        let store = MemoryStore::new();
        store.put_raw(Collection::Dishes, b"{not json".to_vec());
        assert!(store.has_collection(Collection::Dishes).unwrap());
        assert!(store.dishes().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_ledger_fails_closed() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        store.save_ledger_raw(date, b"[1,2".to_vec()).unwrap();
        let entry = store.ledger(date).unwrap();
        assert_eq!(entry.total, 0.0);
        assert!(entry.billed_tables.is_empty());
    }

    #[test]
    fn test_tables_and_orders_saved_together() {
        let store = MemoryStore::new();
        let mut table = DiningTable::new("t1", 1);
        table.occupy(2);
        store.save_tables_and_orders(&[table], &[]).unwrap();

        let tables = store.tables().unwrap();
        assert_eq!(tables[0].status, TableStatus::Occupied);
        assert!(store.has_collection(Collection::Orders).unwrap());
        assert!(store.orders().unwrap().is_empty());
    }

    #[test]
    fn test_ledger_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(ledger_key(date), "2024-01-09");
    }
}
