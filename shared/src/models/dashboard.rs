//! Dashboard Model

use serde::{Deserialize, Serialize};

/// Counters shown on the home dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_tables: usize,
    pub occupied_tables: usize,
    pub free_tables: usize,
    /// requested + preparing
    pub pending_orders: usize,
    pub daily_total: f64,
}
