//! Shared types for the booking platform
//!
//! Common types consumed by the booking engine and the HTTP layer:
//! domain models, request/response DTOs, request-scoped identity and
//! wire-level error codes.

pub mod error;
pub mod identity;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use error::{ErrorCode, ErrorResponse, InvalidErrorCode};
pub use identity::{Identity, Role};
pub use models::{Booking, BookingStatus, Property, StayRange};
pub use request::{BookingRequest, VerifyPaymentRequest};
pub use response::CheckoutSession;
