use super::OrderEngine;
use crate::core::EngineResult;
use chrono::NaiveDate;
use shared::models::DashboardStats;

impl OrderEngine {
    /// Home page counters for `today`
    pub fn dashboard(&self, today: NaiveDate) -> EngineResult<DashboardStats> {
        let tables = self.store.tables()?;
        let occupied_tables = tables.iter().filter(|t| !t.is_free()).count();
        let pending_orders = self
            .store
            .orders()?
            .iter()
            .filter(|o| o.status.is_pending())
            .count();

        Ok(DashboardStats {
            total_tables: tables.len(),
            occupied_tables,
            free_tables: tables.len() - occupied_tables,
            pending_orders,
            daily_total: self.daily_total(today)?,
        })
    }
}
