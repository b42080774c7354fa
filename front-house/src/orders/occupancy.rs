//! Table occupancy
//!
//! `free → occupied` seats a party; freeing closes the table's orders
//! according to [`FreeTablePolicy`]. The daily ledger is never touched here.

use super::OrderEngine;
use crate::core::{EngineError, EngineResult, FreeTablePolicy};
use serde::{Deserialize, Serialize};
use shared::models::{DiningTable, OrderStatus};
use shared::util::now_millis;

/// Result of freeing a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRelease {
    pub table: DiningTable,
    /// Orders deleted (delete policy) or released (cancel policy)
    pub closed_orders: usize,
}

impl OrderEngine {
    /// Seat `people` guests at a free table
    pub fn occupy_table(&self, table_id: &str, people: i64) -> EngineResult<DiningTable> {
        let (mut tables, index) = self.tables_with(table_id)?;
        if !tables[index].is_free() {
            return Err(EngineError::AlreadyOccupied(table_id.to_string()));
        }
        let people = u32::try_from(people)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(EngineError::InvalidPartySize(people))?;

        tables[index].occupy(people);
        let table = tables[index].clone();
        self.store.save_tables(&tables)?;

        tracing::info!(
            table_id = %table.id,
            table_number = table.number,
            people = people,
            "Table occupied"
        );
        Ok(table)
    }

    /// Free a table from any state and close its orders
    ///
    /// Table state and orders are written in one commit.
    pub fn free_table(&self, table_id: &str) -> EngineResult<TableRelease> {
        let (mut tables, index) = self.tables_with(table_id)?;
        let mut orders = self.store.orders()?;

        let closed_orders = match self.rules.free_table_policy {
            FreeTablePolicy::DeleteOrders => {
                let before = orders.len();
                orders.retain(|o| o.table_id != table_id);
                before - orders.len()
            }
            FreeTablePolicy::CancelOrders => {
                let now = now_millis();
                let mut released = 0;
                for order in orders
                    .iter_mut()
                    .filter(|o| o.table_id == table_id && !o.is_released())
                {
                    if order.status.is_pending() {
                        order.status = OrderStatus::Cancelled;
                        order.updated_at = now;
                    }
                    order.released_at = Some(now);
                    released += 1;
                }
                released
            }
        };

        tables[index].release();
        let table = tables[index].clone();
        self.store.save_tables_and_orders(&tables, &orders)?;

        tracing::info!(
            table_id = %table.id,
            table_number = table.number,
            closed_orders = closed_orders,
            policy = ?self.rules.free_table_policy,
            "Table freed"
        );
        Ok(TableRelease {
            table,
            closed_orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::orders::test_support::{engine, engine_with, waiter};
    use crate::orders::{OrderRules, PendingCart};
    use shared::models::TableStatus;

    #[test]
    fn test_occupy_table() {
        let (engine, store) = engine();
        let table = engine.occupy_table("t1", 3).unwrap();
        assert_eq!(table.status, TableStatus::Occupied);
        assert_eq!(table.occupant_count, 3);

        let stored = store.tables().unwrap();
        assert_eq!(stored[0].occupant_count, 3);

        assert_eq!(
            engine.occupy_table("t1", 2).unwrap_err().kind(),
            ErrorKind::AlreadyOccupied
        );
        assert_eq!(
            engine.occupy_table("t9", 2).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_occupy_rejects_bad_party_size() {
        let (engine, store) = engine();
        for people in [0, -1, i64::from(u32::MAX) + 1] {
            assert_eq!(
                engine.occupy_table("t2", people).unwrap_err().kind(),
                ErrorKind::InvalidPartySize
            );
        }
        assert!(store.tables().unwrap()[1].is_free());
    }

    #[test]
    fn test_free_table_deletes_orders() {
        let (engine, store) = engine();
        engine.occupy_table("t1", 3).unwrap();
        engine.occupy_table("t2", 2).unwrap();
        for table_id in ["t1", "t1", "t2"] {
            let mut cart = PendingCart::new();
            engine.add_to_cart(&mut cart, Some("d1"), 1, "").unwrap();
            engine.submit_order(table_id, &mut cart, Some(&waiter())).unwrap();
        }

        let release = engine.free_table("t1").unwrap();
        assert_eq!(release.closed_orders, 2);
        assert!(release.table.is_free());
        assert_eq!(release.table.occupant_count, 0);

        let orders = store.orders().unwrap();
        assert_eq!(orders.len(), 1);
        assert!(orders.iter().all(|o| o.table_id != "t1"));
    }

    #[test]
    fn test_free_table_cancel_policy_keeps_history() {
        let (engine, store) = engine_with(OrderRules {
            free_table_policy: FreeTablePolicy::CancelOrders,
            ..OrderRules::default()
        });
        engine.occupy_table("t1", 2).unwrap();
        let mut cart = PendingCart::new();
        engine.add_to_cart(&mut cart, Some("d1"), 1, "").unwrap();
        let pending = engine.submit_order("t1", &mut cart, Some(&waiter())).unwrap();

        let release = engine.free_table("t1").unwrap();
        assert_eq!(release.closed_orders, 1);

        let orders = store.orders().unwrap();
        let kept = orders.iter().find(|o| o.order_id == pending.order_id).unwrap();
        assert_eq!(kept.status, OrderStatus::Cancelled);
        assert!(kept.is_released());
        assert!(engine.orders_for_table("t1").unwrap().is_empty());

        // already released orders are not counted again
        assert_eq!(engine.free_table("t1").unwrap().closed_orders, 0);
    }

    #[test]
    fn test_free_table_is_valid_when_free() {
        let (engine, _) = engine();
        let release = engine.free_table("t3").unwrap();
        assert!(release.table.is_free());
        assert_eq!(
            engine.free_table("missing").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
