//! Payment collaborators
//!
//! - **gateway**: order creation against an external payment provider
//! - **signature**: local HMAC-SHA256 verification of gateway callbacks
//!
//! The gateway never mutates a booking; it only hands back signed
//! confirmation data that the engine verifies and applies.

mod gateway;
pub mod signature;

pub use gateway::{GatewayError, MockGateway, OrderMetadata, PaymentGateway, PaymentOrder};
