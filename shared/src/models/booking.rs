//! Booking record and status lifecycle
//!
//! A booking is created `pending`, becomes `confirmed` only through payment
//! reconciliation (or a privileged admin override) and ends up `cancelled`
//! at the request of its owner or an administrator. `cancelled` is terminal.
//! All transitions are owned by the booking engine; collaborators such as
//! the payment gateway never mutate a booking directly.

use super::stay::StayRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Booking status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Booking record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking ID (assigned by the engine)
    pub id: String,
    /// Booked property
    pub property_id: String,
    /// Requesting user
    pub user_id: String,
    /// Stay interval, `[check_in, check_out)`
    #[serde(flatten)]
    pub stay: StayRange,
    /// Guest count, validated against the property's limit at creation
    pub guests: u32,
    /// Derived total (nights x nightly price), frozen at creation
    pub total_price: Decimal,
    /// Lifecycle status
    pub status: BookingStatus,
    /// Opaque gateway reference: the order handle once a payment order is
    /// created, replaced by the payment handle once confirmed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    /// Creation timestamp (ms)
    pub created_at: i64,
    /// Last update timestamp (ms)
    pub updated_at: i64,
}

impl Booking {
    /// Create a new pending booking with a fresh ID
    pub fn new(
        property_id: impl Into<String>,
        user_id: impl Into<String>,
        stay: StayRange,
        guests: u32,
        total_price: Decimal,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            property_id: property_id.into(),
            user_id: user_id.into(),
            stay,
            guests,
            total_price,
            status: BookingStatus::Pending,
            payment_reference: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_booking() -> Booking {
        let stay = StayRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
        );
        Booking::new("prop-1", "user-1", stay, 2, Decimal::from(300))
    }

    #[test]
    fn new_booking_starts_pending() {
        let booking = sample_booking();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.payment_reference.is_none());
        assert!(!booking.id.is_empty());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        assert_eq!(
            serde_json::from_str::<BookingStatus>("\"cancelled\"").unwrap(),
            BookingStatus::Cancelled
        );
    }

    #[test]
    fn stay_flattens_into_booking_json() {
        let json = serde_json::to_value(sample_booking()).unwrap();
        assert_eq!(json["checkIn"], "2024-06-01");
        assert_eq!(json["checkOut"], "2024-06-04");
        assert_eq!(json["totalPrice"], 300.0);
        assert_eq!(json["status"], "pending");
    }
}
