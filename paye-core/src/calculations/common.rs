//! Shared numeric helpers for payroll calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a money amount to two decimal places, midpoint away from zero.
///
/// The result always carries exactly two decimal places, so whole amounts
/// display as `138900.00`. Calculations keep full precision and call this
/// once per output field.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(8460.005)), dec!(8460.01));
/// assert_eq!(round_half_up(dec!(8460.004)), dec!(8460.00));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Floors a value at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-12.50)), dec!(0));
/// assert_eq!(non_negative(dec!(81000)), dec!(81000));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
