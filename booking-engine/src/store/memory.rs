//! In-process store backed by `dashmap`
//!
//! Reference implementation of the store traits for tests and embedders.
//! A per-property `parking_lot::Mutex` serializes the overlap check and the
//! insert, and status writes go through the booking entry's exclusive
//! guard, so both conditional operations are atomic.

use super::{BookingStore, CasOutcome, InsertOutcome, PropertyStore, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use shared::{Booking, BookingStatus, Property, StayRange};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct MemoryStore {
    properties: DashMap<String, Property>,
    bookings: DashMap<String, Booking>,
    /// Per-property insertion locks; entries are created lazily and never
    /// removed, one per property ever booked
    property_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insertion_lock(&self, property_id: &str) -> Arc<Mutex<()>> {
        self.property_locks
            .entry(property_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    fn scan_overlapping(
        &self,
        property_id: &str,
        stay: &StayRange,
        statuses: &[BookingStatus],
    ) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|entry| {
                entry.property_id == property_id
                    && statuses.contains(&entry.status)
                    && entry.stay.overlaps(stay)
            })
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn get_property(&self, id: &str) -> StoreResult<Option<Property>> {
        Ok(self.properties.get(id).map(|entry| entry.value().clone()))
    }

    async fn upsert_property(&self, property: Property) -> StoreResult<()> {
        self.properties.insert(property.id.clone(), property);
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_if_no_conflict(&self, booking: Booking) -> StoreResult<InsertOutcome> {
        let lock = self.insertion_lock(&booking.property_id);
        let _guard = lock.lock();

        let conflicting = self.scan_overlapping(
            &booking.property_id,
            &booking.stay,
            &[BookingStatus::Pending, BookingStatus::Confirmed],
        );
        if !conflicting.is_empty() {
            return Ok(InsertOutcome::Conflict(conflicting));
        }

        self.bookings.insert(booking.id.clone(), booking.clone());
        Ok(InsertOutcome::Inserted(booking))
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_overlapping(
        &self,
        property_id: &str,
        stay: &StayRange,
        statuses: &[BookingStatus],
    ) -> StoreResult<Vec<Booking>> {
        Ok(self.scan_overlapping(property_id, stay, statuses))
    }

    async fn find_by_user(&self, user_id: &str) -> StoreResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_property(&self, property_id: &str) -> StoreResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|entry| entry.property_id == property_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<Booking>> {
        Ok(self.bookings.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn compare_and_set_status(
        &self,
        id: &str,
        expected: BookingStatus,
        new: BookingStatus,
        payment_reference: Option<String>,
    ) -> StoreResult<CasOutcome> {
        // get_mut holds the entry's shard write lock, making the
        // read-check-write sequence atomic
        match self.bookings.get_mut(id) {
            None => Ok(CasOutcome::NotFound),
            Some(mut entry) => {
                if entry.status != expected {
                    return Ok(CasOutcome::PreconditionFailed {
                        actual: entry.status,
                    });
                }
                entry.status = new;
                if let Some(reference) = payment_reference {
                    entry.payment_reference = Some(reference);
                }
                entry.updated_at = chrono::Utc::now().timestamp_millis();
                Ok(CasOutcome::Updated(entry.value().clone()))
            }
        }
    }

    async fn record_payment_reference(
        &self,
        id: &str,
        expected: BookingStatus,
        reference: String,
    ) -> StoreResult<CasOutcome> {
        match self.bookings.get_mut(id) {
            None => Ok(CasOutcome::NotFound),
            Some(mut entry) => {
                if entry.status != expected {
                    return Ok(CasOutcome::PreconditionFailed {
                        actual: entry.status,
                    });
                }
                entry.payment_reference = Some(reference);
                entry.updated_at = chrono::Utc::now().timestamp_millis();
                Ok(CasOutcome::Updated(entry.value().clone()))
            }
        }
    }
}
