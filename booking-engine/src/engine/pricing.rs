//! Price derivation
//!
//! The total is fixed at booking creation: nights times the property's
//! nightly price at that moment. Later price changes never touch existing
//! bookings, and nothing in the engine recomputes a stored total.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::StayRange;

/// Total price for a stay: whole nights x nightly price
pub fn total_price(stay: &StayRange, nightly_price: Decimal) -> Decimal {
    Decimal::from(stay.nights()) * nightly_price
}

/// Total converted to minor currency units (e.g. paise), rounded to the
/// nearest unit with halves away from zero. `None` only when the amount
/// does not fit an i64.
pub fn amount_minor_units(total_price: Decimal) -> Option<i64> {
    (total_price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
