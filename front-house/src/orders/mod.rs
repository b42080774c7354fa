//! Order Engine
//!
//! Table occupancy, the pending cart, the order status machine, billing and
//! the daily revenue ledger. Every operation is a read-modify-write against
//! the injected [`Store`]; there is a single caller, so no locking.
//!
//! # 模块结构
//!
//! - [`cart`] - 待提交购物车
//! - [`occupancy`] - 餐桌占用 / 释放
//! - [`lifecycle`] - 订单提交与状态机
//! - [`billing`] - 账单计算 (纯函数)
//! - [`ledger`] - 每日营业额 (幂等入账)
//! - [`dashboard`] - 首页统计

pub mod billing;
pub mod cart;
pub mod dashboard;
pub mod ledger;
pub mod lifecycle;
pub mod occupancy;

pub use billing::build_bill;
pub use cart::PendingCart;

use crate::core::{Config, EngineError, EngineResult, Entity, FreeTablePolicy};
use crate::store::Store;
use shared::models::DiningTable;
use std::sync::Arc;

/// Business rules taken from [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRules {
    pub service_tax_percent: u32,
    pub max_item_quantity: u32,
    pub free_table_policy: FreeTablePolicy,
}

impl Default for OrderRules {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for OrderRules {
    fn from(config: &Config) -> Self {
        Self {
            service_tax_percent: config.service_tax_percent,
            max_item_quantity: config.max_item_quantity,
            free_table_policy: config.free_table_policy,
        }
    }
}

/// Order engine service
#[derive(Clone)]
pub struct OrderEngine {
    store: Arc<dyn Store>,
    rules: OrderRules,
}

impl OrderEngine {
    pub fn new(store: Arc<dyn Store>, rules: OrderRules) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> &OrderRules {
        &self.rules
    }

    /// Load all tables plus the index of `table_id`
    fn tables_with(&self, table_id: &str) -> EngineResult<(Vec<DiningTable>, usize)> {
        let tables = self.store.tables()?;
        let index = tables
            .iter()
            .position(|t| t.id == table_id)
            .ok_or_else(|| EngineError::not_found(Entity::Table, table_id))?;
        Ok((tables, index))
    }

    fn table(&self, table_id: &str) -> EngineResult<DiningTable> {
        let (mut tables, index) = self.tables_with(table_id)?;
        Ok(tables.swap_remove(index))
    }
}
