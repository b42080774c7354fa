//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
}

/// Dining table entity (mesa)
///
/// `occupant_count` is 0 while free and at least 1 while occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    /// Unique, positive
    pub number: u32,
    pub status: TableStatus,
    pub occupant_count: u32,
}

impl DiningTable {
    /// A new table always starts free and empty
    pub fn new(id: impl Into<String>, number: u32) -> Self {
        Self {
            id: id.into(),
            number,
            status: TableStatus::Free,
            occupant_count: 0,
        }
    }

    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free
    }

    pub fn occupy(&mut self, people: u32) {
        self.status = TableStatus::Occupied;
        self.occupant_count = people;
    }

    pub fn release(&mut self) {
        self.status = TableStatus::Free;
        self.occupant_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_free() {
        let table = DiningTable::new("t1", 1);
        assert!(table.is_free());
        assert_eq!(table.occupant_count, 0);
    }

    #[test]
    fn test_occupy_and_release() {
        let mut table = DiningTable::new("t1", 1);
        table.occupy(4);
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.occupant_count, 4);
        table.release();
        assert!(table.is_free());
        assert_eq!(table.occupant_count, 0);
    }
}
