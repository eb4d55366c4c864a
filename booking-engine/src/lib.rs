//! Booking Engine - availability, pricing, lifecycle and payment reconciliation
//!
//! # Architecture
//!
//! ```text
//! booking-engine/src/
//! ├── config.rs      # Engine configuration (payment keys, timeouts)
//! ├── error.rs       # BookingError taxonomy
//! ├── engine/        # Operations: validate, availability, pricing, lifecycle
//! ├── payment/       # Gateway trait, HMAC signature verification
//! ├── store/         # Store traits + in-process implementation
//! └── logger.rs      # Opt-in tracing setup for embedders and tests
//! ```
//!
//! # Request Flow
//!
//! ```text
//! request_booking(identity, request)
//!     ├─ 1. Validate and normalize the request
//!     ├─ 2. Look up the property (price, guest limit)
//!     ├─ 3. Compute total price (nights x nightly price)
//!     ├─ 4. insert_if_no_conflict (serialized per property)
//!     └─ 5. Return the pending booking
//! ```
//!
//! Payment confirmation and cancellation commit through compare-and-set on
//! the booking status, so a transition never lands on a state that changed
//! after it was checked.

pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod payment;
pub mod store;

// Re-export public types
pub use config::EngineConfig;
pub use engine::{Availability, BookingEngine};
pub use error::{BookingError, BookingResult};
pub use payment::{MockGateway, OrderMetadata, PaymentGateway, PaymentOrder};
pub use store::{BookingStore, MemoryStore, PropertyStore};

// Re-export shared types for convenience
pub use shared::{
    Booking, BookingRequest, BookingStatus, CheckoutSession, ErrorCode, ErrorResponse, Identity,
    Property, Role, StayRange, VerifyPaymentRequest,
};
