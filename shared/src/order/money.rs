//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64`; every calculation converts to `Decimal`,
//! computes, and rounds back to 2 decimal places (half away from zero).

use super::DraftError;
use rust_decimal::prelude::*;

/// Decimal places of monetary values
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
pub const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field: &'static str) -> Result<(), DraftError> {
    if !value.is_finite() {
        return Err(DraftError::NotFinite { field, value });
    }
    Ok(())
}

/// Validate a unit price
pub fn validate_price(price: f64) -> Result<(), DraftError> {
    require_finite(price, "price")?;
    if !(0.0..=MAX_PRICE).contains(&price) {
        return Err(DraftError::InvalidPrice(price));
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i32) -> Result<(), DraftError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(DraftError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to 2 decimal places
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}
