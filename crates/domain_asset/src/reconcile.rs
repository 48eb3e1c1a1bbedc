//! Unit/amount reconciliation
//!
//! A write supplies an amount, a unit count, or both. The missing side is
//! derived from the daily reference price:
//!
//! 1. A non-zero amount sets `unit = round(amount * UNIT_SCALE / price)`.
//! 2. A non-zero unit (possibly just derived) then sets
//!    `amount = round(price * unit / UNIT_SCALE)`.
//!
//! The returned amount is always the value of the returned unit whenever
//! that unit is non-zero, so a supplied amount may come back adjusted.
//! Each derivation rounds half away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::AssetUnitError;
use crate::UNIT_SCALE;

/// Rounds to the nearest integer, ties away from zero
pub fn round_half_away(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Derives the missing side of `(unit, amount)` at the given price
///
/// # Arguments
///
/// * `price` - Reference price for the asset on the record's date
/// * `unit` - Requested unit count (scaled), or zero
/// * `amount` - Requested amount, or zero
///
/// # Returns
///
/// The reconciled `(unit, amount)` pair
///
/// # Errors
///
/// * `InvalidPrice` if an amount must be converted at a zero price
/// * `Calculation` if a derived value does not fit in an `i64`
///
/// # Example
///
/// ```rust
/// use domain_asset::reconcile;
///
/// assert_eq!(reconcile(5000, 0, 10000).unwrap(), (20000, 10000));
/// assert_eq!(reconcile(3, 0, 1).unwrap(), (3333, 1));
/// ```
pub fn reconcile(price: i64, unit: i64, amount: i64) -> Result<(i64, i64), AssetUnitError> {
    let scale = Decimal::from(UNIT_SCALE);
    let price_value = Decimal::from(price);
    let mut unit = unit;
    let mut amount = amount;

    if amount != 0 {
        if price == 0 {
            return Err(AssetUnitError::InvalidPrice(price));
        }
        let raw = Decimal::from(amount)
            .checked_mul(scale)
            .and_then(|v| v.checked_div(price_value))
            .ok_or_else(|| overflow("unit", amount, price))?;
        unit = to_i64(round_half_away(raw), "unit")?;
    }

    if unit != 0 {
        let raw = price_value
            .checked_mul(Decimal::from(unit))
            .and_then(|v| v.checked_div(scale))
            .ok_or_else(|| overflow("amount", unit, price))?;
        amount = to_i64(round_half_away(raw), "amount")?;
    }

    Ok((unit, amount))
}

fn to_i64(value: Decimal, field: &str) -> Result<i64, AssetUnitError> {
    value
        .to_i64()
        .ok_or_else(|| AssetUnitError::Calculation(format!("{} {} is out of range", field, value)))
}

fn overflow(field: &str, input: i64, price: i64) -> AssetUnitError {
    AssetUnitError::Calculation(format!(
        "deriving {} from {} at price {} overflowed",
        field, input, price
    ))
}
