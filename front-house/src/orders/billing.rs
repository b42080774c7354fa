//! Table bill
//!
//! A pure function of the table's orders and the tax flag: items of every
//! non-cancelled, unreleased order are merged by `(dish_id, observation)`
//! using the price snapshotted on the order, never the live catalog price.

use super::OrderEngine;
use crate::core::EngineResult;
use crate::order_money::{self, line_total, percentage_of, split_evenly};
use rust_decimal::Decimal;
use shared::models::{Bill, BillLine, DiningTable, Order};

/// Build the itemized bill of `table` from `orders`
///
/// Orders of other tables are ignored, so the full order list can be passed.
pub fn build_bill(
    table: &DiningTable,
    orders: &[Order],
    include_service_tax: bool,
    service_tax_percent: u32,
) -> Bill {
    let mut lines: Vec<BillLine> = Vec::new();
    let billable = orders
        .iter()
        .filter(|o| o.table_id == table.id && o.status.is_billable() && !o.is_released());

    for item in billable.flat_map(|o| o.items.iter()) {
        match lines
            .iter_mut()
            .find(|l| l.dish_id == item.dish_id && l.observation == item.observation)
        {
            Some(line) => line.quantity += item.quantity,
            None => lines.push(BillLine {
                dish_id: item.dish_id.clone(),
                name: item.name.clone(),
                observation: item.observation.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                line_total: 0.0,
            }),
        }
    }

    let mut subtotal = Decimal::ZERO;
    for line in &mut lines {
        let total = line_total(line.unit_price, line.quantity);
        line.line_total = order_money::to_f64(total);
        subtotal += total;
    }
    let subtotal = order_money::round_money(subtotal);

    let service_tax = if include_service_tax && subtotal > Decimal::ZERO {
        percentage_of(subtotal, service_tax_percent)
    } else {
        Decimal::ZERO
    };
    let grand_total = subtotal + service_tax;

    let per_person = (table.occupant_count > 1 && grand_total > Decimal::ZERO)
        .then(|| order_money::to_f64(split_evenly(grand_total, table.occupant_count)));

    Bill {
        table_id: table.id.clone(),
        table_number: table.number,
        occupant_count: table.occupant_count,
        lines,
        subtotal: order_money::to_f64(subtotal),
        include_service_tax,
        service_tax: order_money::to_f64(service_tax),
        grand_total: order_money::to_f64(grand_total),
        per_person,
    }
}

impl OrderEngine {
    /// Current bill of a table; no side effects
    pub fn compute_bill(&self, table_id: &str, include_service_tax: bool) -> EngineResult<Bill> {
        let table = self.table(table_id)?;
        let orders = self.store.orders()?;
        Ok(build_bill(
            &table,
            &orders,
            include_service_tax,
            self.rules.service_tax_percent,
        ))
    }
}
