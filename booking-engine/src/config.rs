//! Engine configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | PAYMENT_KEY_ID | key_test | Public key handed to the payment widget |
//! | PAYMENT_KEY_SECRET | secret_test | HMAC secret for signature verification |
//! | PAYMENT_CURRENCY | INR | Currency for payment orders |
//! | STORE_TIMEOUT_MS | 5000 | Per-call store/gateway timeout |
//!
//! The secret and key id are process-wide configuration; they never travel
//! in request data.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Public gateway key id, returned in checkout sessions
    pub payment_key_id: String,
    /// Shared HMAC secret for payment signature verification
    pub payment_key_secret: String,
    /// ISO currency code for payment orders
    pub currency: String,
    /// Timeout applied to every store and gateway call
    pub store_timeout: Duration,
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// development defaults
    pub fn from_env() -> Self {
        Self {
            payment_key_id: std::env::var("PAYMENT_KEY_ID").unwrap_or_else(|_| "key_test".into()),
            payment_key_secret: std::env::var("PAYMENT_KEY_SECRET")
                .unwrap_or_else(|_| "secret_test".into()),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into()),
            store_timeout: Duration::from_millis(
                std::env::var("STORE_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5000),
            ),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            payment_key_id: "key_test".into(),
            payment_key_secret: "secret_test".into(),
            currency: "INR".into(),
            store_timeout: Duration::from_millis(5000),
        }
    }
}
