//! Store traits for properties and bookings
//!
//! The engine talks to persistence exclusively through these traits. The
//! two conflict-sensitive operations carry their precondition into the
//! store so the check and the write commit atomically:
//!
//! - `insert_if_no_conflict` must serialize the overlap check and the
//!   insert per property; two concurrent requests for overlapping dates
//!   must not both succeed.
//! - `compare_and_set_status` must apply the transition only if the
//!   current status still equals the expected one at commit time.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use shared::{Booking, BookingStatus, Property, StayRange};
use thiserror::Error;

/// Store-level failures, all treated as transient by the engine
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("internal store error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a conditional insert
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted(Booking),
    /// The bookings whose stays overlap the attempted one
    Conflict(Vec<Booking>),
}

/// Outcome of a compare-and-set against a booking's status
#[derive(Debug, Clone)]
pub enum CasOutcome {
    Updated(Booking),
    /// The status read at commit time no longer matched the expectation
    PreconditionFailed { actual: BookingStatus },
    NotFound,
}

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn get_property(&self, id: &str) -> StoreResult<Option<Property>>;

    async fn upsert_property(&self, property: Property) -> StoreResult<()>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert `booking` unless an existing pending/confirmed booking on the
    /// same property overlaps its stay. Check and insert are atomic with
    /// respect to other inserts on the same property.
    async fn insert_if_no_conflict(&self, booking: Booking) -> StoreResult<InsertOutcome>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Booking>>;

    /// All bookings on `property_id` whose stay overlaps `stay` and whose
    /// status is one of `statuses`
    async fn find_overlapping(
        &self,
        property_id: &str,
        stay: &StayRange,
        statuses: &[BookingStatus],
    ) -> StoreResult<Vec<Booking>>;

    async fn find_by_user(&self, user_id: &str) -> StoreResult<Vec<Booking>>;

    async fn find_by_property(&self, property_id: &str) -> StoreResult<Vec<Booking>>;

    async fn list_all(&self) -> StoreResult<Vec<Booking>>;

    /// Set status to `new` iff the current status equals `expected`.
    /// `payment_reference`, when given, is recorded in the same write.
    async fn compare_and_set_status(
        &self,
        id: &str,
        expected: BookingStatus,
        new: BookingStatus,
        payment_reference: Option<String>,
    ) -> StoreResult<CasOutcome>;

    /// Record a payment reference without touching the status; fails the
    /// precondition if the status is no longer `expected`.
    async fn record_payment_reference(
        &self,
        id: &str,
        expected: BookingStatus,
        reference: String,
    ) -> StoreResult<CasOutcome>;
}
