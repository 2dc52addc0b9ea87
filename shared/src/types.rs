//! Common types used across the intake workflow

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half-up (ties away from zero) to `dp` places and pad the scale to
/// exactly `dp`, so `7900` becomes `7900.00`.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// Two decimal places, the precision of every stored percentage and amount
pub fn round2(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

/// `max(0, value - base)`, saturating at `Decimal::MAX`
pub fn excess(value: Decimal, base: Decimal) -> Decimal {
    if value > base {
        value.saturating_sub(base)
    } else {
        Decimal::ZERO
    }
}

/// Zero with a scale of two, matching stored amounts
pub fn zero2() -> Decimal {
    Decimal::new(0, 2)
}
