//! Daily revenue ledger
//!
//! One entry per calendar day: the running total and the set of tables
//! already billed. Posting is idempotent per `(table, day)`, and nothing ever
//! subtracts from the total.

use super::OrderEngine;
use crate::core::EngineResult;
use crate::order_money::{self, to_decimal};
use chrono::NaiveDate;
use shared::models::{LedgerPosting, Receipt};
use std::collections::BTreeSet;

impl OrderEngine {
    /// Add the table's bill to the day's total, once per table per day
    ///
    /// The amount is the bill at the moment of the first posting; later calls
    /// for the same table and day change nothing.
    pub fn post_to_daily_ledger(
        &self,
        table_id: &str,
        date: NaiveDate,
        include_service_tax: bool,
    ) -> EngineResult<LedgerPosting> {
        let mut entry = self.store.ledger(date)?;
        if entry.is_billed(table_id) {
            tracing::debug!(table_id = %table_id, date = %date, "Table already billed today");
            return Ok(LedgerPosting {
                date,
                table_id: table_id.to_string(),
                posted: false,
                amount: 0.0,
                daily_total: entry.total,
            });
        }

        let bill = self.compute_bill(table_id, include_service_tax)?;
        let total = to_decimal(entry.total) + to_decimal(bill.grand_total);
        entry.total = order_money::to_f64(total);
        entry.billed_tables.insert(table_id.to_string());
        self.store.save_ledger(&entry)?;

        let resource = format!("table:{}", table_id);
        let details = format!(
            "date={} amount={:.2} total={:.2}",
            date, bill.grand_total, entry.total
        );
        crate::audit_log!("system", "post_daily_ledger", resource.as_str(), details.as_str());
        Ok(LedgerPosting {
            date,
            table_id: table_id.to_string(),
            posted: true,
            amount: bill.grand_total,
            daily_total: entry.total,
        })
    }

    /// The receipt-opening event: compute the bill and post it
    ///
    /// Re-rendering the receipt (e.g. toggling the tax flag) should call
    /// [`OrderEngine::compute_bill`] instead.
    pub fn open_receipt(
        &self,
        table_id: &str,
        include_service_tax: bool,
        date: NaiveDate,
    ) -> EngineResult<Receipt> {
        let bill = self.compute_bill(table_id, include_service_tax)?;
        let posting = self.post_to_daily_ledger(table_id, date, include_service_tax)?;
        Ok(Receipt { bill, posting })
    }

    pub fn daily_total(&self, date: NaiveDate) -> EngineResult<f64> {
        Ok(self.store.ledger(date)?.total)
    }

    pub fn billed_tables(&self, date: NaiveDate) -> EngineResult<BTreeSet<String>> {
        Ok(self.store.ledger(date)?.billed_tables)
    }
}
