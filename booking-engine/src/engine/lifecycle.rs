//! Booking status state machine
//!
//! ```text
//! pending ──(payment verified / admin override)──▶ confirmed
//!    │                                                │
//!    └───────────(owner or admin)────▶ cancelled ◀────┘
//! ```
//!
//! `cancelled` is fully terminal. Re-cancelling is rejected with its own
//! error, every other illegal move with `InvalidTransition`. The checks
//! here gate a transition before commit; the store's compare-and-set
//! re-validates the precondition at commit time.

use crate::error::{BookingError, BookingResult};
use shared::BookingStatus;

/// Whether `from -> to` is a legal transition
pub fn check_transition(from: BookingStatus, to: BookingStatus) -> BookingResult<()> {
    use BookingStatus::*;
    match (from, to) {
        (Cancelled, Cancelled) => Err(BookingError::AlreadyCancelled),
        (Pending | Confirmed, Cancelled) => Ok(()),
        (Pending, Confirmed) => Ok(()),
        (from, to) => Err(BookingError::InvalidTransition { from, to }),
    }
}

/// Error for a transition whose store precondition failed at commit time:
/// the booking moved to `actual` after it was checked. The transition is
/// not retried even if `actual -> intended` would itself be legal.
pub fn commit_conflict(actual: BookingStatus, intended: BookingStatus) -> BookingError {
    match check_transition(actual, intended) {
        Err(err) => err,
        Ok(()) => BookingError::InvalidTransition {
            from: actual,
            to: intended,
        },
    }
}
