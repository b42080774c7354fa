//! Order Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status (kitchen workflow)
///
/// ```text
/// requested -> {preparing, cancelled}
/// preparing -> {requested, completed, cancelled}
/// completed -> {}
/// cancelled -> {}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Requested,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Requested,
        OrderStatus::Preparing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Requested => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[
                OrderStatus::Requested,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Counts toward the table bill
    pub fn is_billable(&self) -> bool {
        !matches!(self, OrderStatus::Cancelled)
    }

    /// Still waiting on the kitchen
    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Requested | OrderStatus::Preparing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Requested => "requested",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line of a submitted order
///
/// Name, price and category are snapshots taken at submission; later catalog
/// edits never change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub dish_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub observation: String,
    #[serde(default)]
    pub category: String,
}

fn to_money(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

impl OrderItem {
    fn amount(&self) -> Decimal {
        Decimal::from_f64(self.price).unwrap_or_default() * Decimal::from(self.quantity)
    }

    /// price × quantity, rounded to cents
    pub fn line_total(&self) -> f64 {
        to_money(self.amount())
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub table_id: String,
    /// Table number at submission time
    pub table_number: u32,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Unix millis
    pub created_at: i64,
    pub updated_at: i64,
    pub created_by_user_id: String,
    pub created_by_user_name: String,
    /// Set when the table was freed while keeping the order for history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released_at: Option<i64>,
}

impl Order {
    /// Σ quantity × price of this order's own items
    pub fn total(&self) -> f64 {
        to_money(self.items.iter().map(OrderItem::amount).sum())
    }

    pub fn is_released(&self) -> bool {
        self.released_at.is_some()
    }

    /// UTC calendar date of `created_at`
    pub fn created_date(&self) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(self.created_at).map(|dt| dt.date_naive())
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.items.iter().any(|item| item.category == category)
    }
}

/// Filter for the order list page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(date) = self.date
            && order.created_date() != Some(date)
        {
            return false;
        }
        if let Some(category) = self.category.as_deref()
            && !order.has_category(category)
        {
            return false;
        }
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }
        true
    }
}
