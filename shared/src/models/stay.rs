//! Half-open date interval for stays
//!
//! A stay covers `[check_in, check_out)`: the check-in night is included,
//! the check-out day is not. Overlap arithmetic uses the half-open form so
//! that one guest's check-out day can be another guest's check-in day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date range of a stay, `[check_in, check_out)`
///
/// Construction does not enforce ordering; the request validator rejects
/// inverted ranges before a `StayRange` reaches the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct StayRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Number of nights, i.e. whole calendar days between the two dates.
    ///
    /// Negative for inverted ranges; callers validate ordering first.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Standard half-open interval overlap: `[a1, a2)` and `[b1, b2)`
    /// conflict iff `a1 < b2 && b1 < a2`. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

impl std::fmt::Display for StayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}
