//! Pending cart
//!
//! Lines accumulate per table until the order is sent to the kitchen. A line
//! is identified by `(dish_id, observation)`; adding the same pair again
//! raises the quantity instead of appending.

use super::OrderEngine;
use crate::core::{EngineError, EngineResult, Entity};
use crate::utils::validation::{MAX_NOTE_LEN, check_len};
use serde::{Deserialize, Serialize};
use shared::models::{FALLBACK_CATEGORY, OrderItem};

/// Items chosen for a table, not yet submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingCart {
    pub lines: Vec<OrderItem>,
}

impl PendingCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, dish_id: &str, observation: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.dish_id == dish_id && l.observation == observation)
    }

    /// Σ price × quantity over the cart
    pub fn total(&self) -> f64 {
        let total = self
            .lines
            .iter()
            .map(|l| crate::order_money::line_total(l.price, l.quantity))
            .sum();
        crate::order_money::to_f64(total)
    }
}

impl OrderEngine {
    /// Add a dish to the cart, merging into a line with the same observation
    ///
    /// The dish's name, price and category are snapshotted into the line.
    /// `max_item_quantity` bounds the merged line as well as each single add,
    /// so a line never grows past it through repeated adds.
    pub fn add_to_cart(
        &self,
        cart: &mut PendingCart,
        dish_id: Option<&str>,
        quantity: i64,
        observation: &str,
    ) -> EngineResult<()> {
        let dish_id = match dish_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(EngineError::EmptySelection),
        };
        let max = self.rules.max_item_quantity;
        let added = u32::try_from(quantity)
            .ok()
            .filter(|q| (1..=max).contains(q))
            .ok_or(EngineError::InvalidQuantity { quantity, max })?;

        let dish = self
            .store
            .dishes()?
            .into_iter()
            .find(|d| d.id == dish_id)
            .ok_or_else(|| EngineError::not_found(Entity::Dish, dish_id))?;

        let observation = observation.trim();
        check_len(observation, "observation", MAX_NOTE_LEN)?;

        if let Some(index) = cart.position(dish_id, observation) {
            let line = &mut cart.lines[index];
            let merged = line.quantity + added;
            if merged > max {
                return Err(EngineError::InvalidQuantity {
                    quantity: i64::from(merged),
                    max,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        let category = if dish.category.trim().is_empty() {
            FALLBACK_CATEGORY.to_string()
        } else {
            dish.category
        };
        cart.lines.push(OrderItem {
            dish_id: dish.id,
            name: dish.name,
            price: dish.price,
            quantity: added,
            observation: observation.to_string(),
            category,
        });
        Ok(())
    }

    /// Remove the `(dish_id, observation)` line; `false` when nothing matched
    pub fn remove_from_cart(&self, cart: &mut PendingCart, dish_id: &str, observation: &str) -> bool {
        let observation = observation.trim();
        match cart.position(dish_id, observation) {
            Some(index) => {
                cart.lines.remove(index);
                true
            }
            None => {
                tracing::warn!(
                    dish_id = %dish_id,
                    observation = %observation,
                    "No cart line to remove"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::orders::OrderRules;
    use crate::orders::test_support::{engine, engine_with};

    #[test]
    fn test_merges_same_dish_and_observation() {
        let (engine, _) = engine();
        let mut cart = PendingCart::new();

        engine.add_to_cart(&mut cart, Some("d1"), 1, "").unwrap();
        engine.add_to_cart(&mut cart, Some("d1"), 1, "  ").unwrap();
        engine.add_to_cart(&mut cart, Some("d1"), 2, "sem sal").unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].observation, "");
        assert_eq!(cart.lines[1].quantity, 2);
        assert_eq!(cart.lines[1].observation, "sem sal");
        assert_eq!(cart.total(), 40.0);
    }

    #[test]
    fn test_snapshots_dish_fields() {
        let (engine, _) = engine();
        let mut cart = PendingCart::new();
        engine.add_to_cart(&mut cart, Some("d3"), 3, "").unwrap();

        let line = &cart.lines[0];
        assert_eq!(line.name, "Pão");
        assert_eq!(line.price, 3.3);
        assert_eq!(line.category, "Outros");
        assert_eq!(cart.total(), 9.9);
    }

    #[test]
    fn test_rejects_bad_input() {
        let (engine, _) = engine();
        let mut cart = PendingCart::new();

        let kind = |r: EngineResult<()>| r.unwrap_err().kind();
        assert_eq!(kind(engine.add_to_cart(&mut cart, None, 1, "")), ErrorKind::EmptySelection);
        assert_eq!(kind(engine.add_to_cart(&mut cart, Some(" "), 1, "")), ErrorKind::EmptySelection);
        assert_eq!(kind(engine.add_to_cart(&mut cart, Some("d1"), 0, "")), ErrorKind::InvalidQuantity);
        assert_eq!(kind(engine.add_to_cart(&mut cart, Some("d1"), -2, "")), ErrorKind::InvalidQuantity);
        assert_eq!(kind(engine.add_to_cart(&mut cart, Some("d1"), 100, "")), ErrorKind::InvalidQuantity);
        assert_eq!(kind(engine.add_to_cart(&mut cart, Some("d9"), 1, "")), ErrorKind::NotFound);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merged_line_respects_cap() {
        let (engine, _) = engine_with(OrderRules {
            max_item_quantity: 5,
            ..OrderRules::default()
        });
        let mut cart = PendingCart::new();
        engine.add_to_cart(&mut cart, Some("d1"), 5, "").unwrap();

        let err = engine.add_to_cart(&mut cart, Some("d1"), 1, "").unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity { quantity: 6, max: 5 }));
        assert_eq!(cart.lines[0].quantity, 5);
    }

    #[test]
    fn test_remove_from_cart() {
        let (engine, _) = engine();
        let mut cart = PendingCart::new();
        engine.add_to_cart(&mut cart, Some("d1"), 1, "").unwrap();
        engine.add_to_cart(&mut cart, Some("d1"), 1, "bem passado").unwrap();

        assert!(!engine.remove_from_cart(&mut cart, "d1", "mal passado"));
        assert_eq!(cart.len(), 2);
        assert!(engine.remove_from_cart(&mut cart, "d1", "bem passado"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines[0].observation, "");
    }
}
