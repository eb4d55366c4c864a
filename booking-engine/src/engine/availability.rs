//! Availability checking
//!
//! Only pending and confirmed bookings block dates; cancelled stays free
//! them. The read-only check here reports conflicts; the authoritative
//! check is the store's conditional insert, which re-runs the same
//! predicate atomically with the write. (See `store::BookingStore`.)

use serde::Serialize;
use shared::{Booking, BookingStatus};

/// Statuses that make a booking occupy its dates
pub const BLOCKING_STATUSES: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

/// Result of an availability query
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "conflicts", rename_all = "lowercase")]
pub enum Availability {
    Available,
    /// The bookings occupying part of the requested interval
    Conflict(Vec<Booking>),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    /// Classify the overlap query result
    pub fn from_overlapping(overlapping: Vec<Booking>) -> Self {
        if overlapping.is_empty() {
            Availability::Available
        } else {
            Availability::Conflict(overlapping)
        }
    }
}
