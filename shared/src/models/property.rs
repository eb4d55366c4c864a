//! Rental property referenced by bookings
//!
//! The booking engine reads properties, it never mutates them. A price
//! change on a property must not touch existing bookings; their
//! `total_price` is frozen at creation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rental property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property ID
    pub id: String,
    /// Owning host's user ID
    pub host_id: String,
    /// Price per night
    pub nightly_price: Decimal,
    /// Maximum number of guests
    pub max_guests: u32,
}

impl Property {
    /// Create a property with a fresh ID
    pub fn new(host_id: impl Into<String>, nightly_price: Decimal, max_guests: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            host_id: host_id.into(),
            nightly_price,
            max_guests,
        }
    }
}
