//! Response DTOs for the booking engine

use serde::{Deserialize, Serialize};

/// Everything the client needs to open a payment flow for a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Opaque order handle from the gateway
    pub order_id: String,
    /// Amount in minor currency units
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Public key identifying the merchant to the gateway widget
    pub key_id: String,
}
