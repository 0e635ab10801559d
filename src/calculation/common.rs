//! Helpers shared by the calculation modules.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use household_income::calculation::round_half_up;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Looks up a value in a table keyed by household size.
///
/// Sizes above `cap` use the `cap` entry. A missing entry falls back to the
/// `cap` entry, then to the largest configured tier, then to zero.
pub fn tier_lookup(table: &BTreeMap<u32, Decimal>, size: u32, cap: u32) -> Decimal {
    table
        .get(&size.min(cap))
        .or_else(|| table.get(&cap))
        .or_else(|| table.values().next_back())
        .copied()
        .unwrap_or(Decimal::ZERO)
}

/// Divides, treating a zero denominator as a ratio of zero.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}
