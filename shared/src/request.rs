//! Request DTOs for the booking engine
//!
//! Raw, optional-typed request bodies as they arrive from the HTTP layer.
//! `deny_unknown_fields` rejects stray fields at the boundary; presence and
//! format checks happen in the engine's validator so the caller gets the
//! documented error ordering.

use serde::{Deserialize, Serialize};

/// Booking creation request, pre-validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingRequest {
    pub property_id: Option<String>,
    /// Check-in date, `YYYY-MM-DD`
    pub check_in: Option<String>,
    /// Check-out date, `YYYY-MM-DD`
    pub check_out: Option<String>,
    pub guests: Option<i64>,
}

/// Payment verification callback payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VerifyPaymentRequest {
    pub booking_id: String,
    /// Order handle returned by `create_payment_order`
    pub order_id: String,
    /// Payment handle issued by the gateway
    pub payment_id: String,
    /// Hex HMAC-SHA256 over `"{order_id}|{payment_id}"`
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<BookingRequest>(
            r#"{"propertyId":"p1","checkIn":"2024-06-01","checkOut":"2024-06-05","guests":2,"role":"admin"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let req: BookingRequest = serde_json::from_str(r#"{"propertyId":"p1"}"#).unwrap();
        assert_eq!(req.property_id.as_deref(), Some("p1"));
        assert!(req.check_in.is_none());
        assert!(req.guests.is_none());
    }
}
