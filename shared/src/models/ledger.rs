//! Daily Ledger Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Revenue accumulator for one calendar day
///
/// One-way: tables are only ever added, the total only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLedgerEntry {
    pub date: NaiveDate,
    pub total: f64,
    #[serde(default)]
    pub billed_tables: BTreeSet<String>,
}

impl DailyLedgerEntry {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0.0,
            billed_tables: BTreeSet::new(),
        }
    }

    pub fn is_billed(&self, table_id: &str) -> bool {
        self.billed_tables.contains(table_id)
    }
}
