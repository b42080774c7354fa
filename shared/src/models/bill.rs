//! Bill / Receipt Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Merged bill line, keyed by (dish_id, observation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub dish_id: String,
    pub name: String,
    pub observation: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Itemized table bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub table_id: String,
    pub table_number: u32,
    pub occupant_count: u32,
    pub lines: Vec<BillLine>,
    pub subtotal: f64,
    pub include_service_tax: bool,
    pub service_tax: f64,
    pub grand_total: f64,
    /// Only present for parties larger than one
    pub per_person: Option<f64>,
}

impl Bill {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Outcome of posting a bill to the daily ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerPosting {
    pub date: NaiveDate,
    pub table_id: String,
    /// false when the table was already billed that day
    pub posted: bool,
    /// Amount added by this call (0 on a repeat)
    pub amount: f64,
    pub daily_total: f64,
}

/// Receipt view: the bill plus the posting made when it was opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub bill: Bill,
    pub posting: LedgerPosting,
}
