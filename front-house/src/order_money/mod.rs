//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed dish price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal out of f64 range, defaulting to zero");
        0.0
    })
}

/// unit price × quantity
pub fn line_total(unit_price: f64, quantity: u32) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// `percent`% of `amount`, rounded
pub fn percentage_of(amount: Decimal, percent: u32) -> Decimal {
    round_money(amount * Decimal::from(percent) / Decimal::ONE_HUNDRED)
}

/// Equal split of `total` among `people`, rounded
pub fn split_evenly(total: Decimal, people: u32) -> Decimal {
    if people == 0 {
        return total;
    }
    round_money(total / Decimal::from(people))
}

/// Price must be a finite, non-negative number below [`MAX_PRICE`]
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && (0.0..=MAX_PRICE).contains(&price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_avoids_float_drift() {
        // 0.1 * 3 in f64 is 0.30000000000000004
        assert_eq!(to_f64(line_total(0.1, 3)), 0.3);
        assert_eq!(to_f64(line_total(22.5, 2)), 45.0);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage_of(Decimal::from(20), 10), Decimal::from(2));
        // 10% of 0.05 = 0.005 rounds away from zero
        let tax = percentage_of(to_decimal(0.05), 10);
        assert_eq!(to_f64(tax), 0.01);
    }

    #[test]
    fn test_split_evenly() {
        assert_eq!(to_f64(split_evenly(Decimal::from(22), 2)), 11.0);
        assert_eq!(to_f64(split_evenly(Decimal::from(10), 3)), 3.33);
        assert_eq!(split_evenly(Decimal::from(10), 0), Decimal::from(10));
    }

    #[test]
    fn test_price_validation() {
        assert!(is_valid_price(0.0));
        assert!(is_valid_price(22.5));
        assert!(!is_valid_price(-0.01));
        assert!(!is_valid_price(f64::NAN));
        assert!(!is_valid_price(f64::INFINITY));
        assert!(!is_valid_price(MAX_PRICE + 1.0));
    }

    #[test]
    fn test_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
