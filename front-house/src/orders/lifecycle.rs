//! Order submission and status machine
//!
//! ```text
//! requested  -> preparing | cancelled
//! preparing  -> requested | completed | cancelled
//! completed, cancelled: terminal
//! ```

use super::{OrderEngine, PendingCart};
use crate::core::{EngineError, EngineResult, Entity};
use crate::session::SessionContext;
use shared::models::{Order, OrderFilter, OrderStatus};
use shared::util::{now_millis, prefixed_id};

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.order_id.cmp(&a.order_id))
    });
}

impl OrderEngine {
    /// Send the cart to the kitchen as a new `requested` order
    ///
    /// The cart is cleared only when the order was stored.
    pub fn submit_order(
        &self,
        table_id: &str,
        cart: &mut PendingCart,
        actor: Option<&SessionContext>,
    ) -> EngineResult<Order> {
        if cart.is_empty() {
            return Err(EngineError::EmptyCart);
        }
        let actor = SessionContext::resolve(actor)?;
        let table = self.table(table_id)?;
        if table.is_free() {
            return Err(EngineError::TableNotOccupied(table_id.to_string()));
        }

        let now = now_millis();
        let order = Order {
            order_id: prefixed_id('o'),
            table_id: table.id,
            table_number: table.number,
            items: cart.lines.clone(),
            status: OrderStatus::Requested,
            created_at: now,
            updated_at: now,
            created_by_user_id: actor.user_id.clone(),
            created_by_user_name: actor.user_name.clone(),
            released_at: None,
        };

        let mut orders = self.store.orders()?;
        orders.push(order.clone());
        self.store.save_orders(&orders)?;
        cart.clear();

        tracing::info!(
            order_id = %order.order_id,
            table_number = order.table_number,
            items = order.items.len(),
            user_id = %actor.user_id,
            "Order sent to kitchen"
        );
        Ok(order)
    }

    /// Move an order along the status machine (admin or kitchen only)
    pub fn update_order_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        actor: Option<&SessionContext>,
    ) -> EngineResult<Order> {
        let actor = SessionContext::resolve(actor)?;
        if !actor.role.can_change_order_status() {
            crate::security_log!(
                WARN,
                "permission_denied",
                user_id = %actor.user_id,
                role = %actor.role,
                action = "update_order_status"
            );
            return Err(EngineError::Forbidden(format!(
                "role {} cannot change order status",
                actor.role
            )));
        }

        let mut orders = self.store.orders()?;
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| EngineError::not_found(Entity::Order, order_id))?;

        let from = order.status;
        if !from.can_transition_to(new_status) {
            return Err(EngineError::InvalidTransition {
                order_id: order_id.to_string(),
                from,
                to: new_status,
            });
        }
        order.status = new_status;
        order.updated_at = now_millis();
        let updated = order.clone();
        self.store.save_orders(&orders)?;

        tracing::info!(
            order_id = %order_id,
            from = %from,
            to = %new_status,
            user_id = %actor.user_id,
            "Order status changed"
        );
        Ok(updated)
    }

    /// Explicit revert of a `preparing` order back to `requested`
    pub fn revert_order_status(
        &self,
        order_id: &str,
        actor: Option<&SessionContext>,
    ) -> EngineResult<Order> {
        let current = self.get_order(order_id)?;
        if current.status != OrderStatus::Preparing {
            return Err(EngineError::InvalidTransition {
                order_id: order_id.to_string(),
                from: current.status,
                to: OrderStatus::Requested,
            });
        }
        self.update_order_status(order_id, OrderStatus::Requested, actor)
    }

    pub fn get_order(&self, order_id: &str) -> EngineResult<Order> {
        self.store
            .orders()?
            .into_iter()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| EngineError::not_found(Entity::Order, order_id))
    }

    /// Ongoing orders of a table, newest first
    pub fn orders_for_table(&self, table_id: &str) -> EngineResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .orders()?
            .into_iter()
            .filter(|o| o.table_id == table_id && !o.is_released())
            .collect();
        newest_first(&mut orders);
        Ok(orders)
    }

    /// Kitchen order list, newest first
    pub fn list_orders(&self, filter: &OrderFilter) -> EngineResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .orders()?
            .into_iter()
            .filter(|o| filter.matches(o))
            .collect();
        newest_first(&mut orders);
        Ok(orders)
    }
}
