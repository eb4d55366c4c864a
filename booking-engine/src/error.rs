//! Booking engine error taxonomy
//!
//! One variant per rejection the engine can surface. Everything except
//! `StoreUnavailable` is terminal for the request: retrying without
//! changing the input will fail the same way.

use shared::{BookingStatus, ErrorCode, ErrorResponse};
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid request: {0}")]
    MalformedRequest(String),

    #[error("Check-out date must be after check-in date")]
    InvalidDateRange,

    #[error("Check-in date cannot be in the past")]
    PastCheckIn,

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Maximum {max_guests} guests allowed")]
    GuestLimitExceeded { max_guests: u32 },

    #[error("Property not available for selected dates")]
    BookingConflict {
        /// IDs of the bookings blocking the requested interval
        conflicting: Vec<String>,
    },

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Access denied")]
    AccessDenied,

    #[error("Cannot transition booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("Booking is not in pending status")]
    BookingNotPending,

    #[error("Payment verification failed")]
    SignatureMismatch,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::MalformedRequest(_) => ErrorCode::MalformedRequest,
            BookingError::InvalidDateRange => ErrorCode::InvalidDateRange,
            BookingError::PastCheckIn => ErrorCode::PastCheckIn,
            BookingError::PropertyNotFound(_) => ErrorCode::PropertyNotFound,
            BookingError::GuestLimitExceeded { .. } => ErrorCode::GuestLimitExceeded,
            BookingError::BookingConflict { .. } => ErrorCode::BookingConflict,
            BookingError::BookingNotFound(_) => ErrorCode::BookingNotFound,
            BookingError::AccessDenied => ErrorCode::AccessDenied,
            BookingError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            BookingError::AlreadyCancelled => ErrorCode::AlreadyCancelled,
            BookingError::BookingNotPending => ErrorCode::BookingNotPending,
            BookingError::SignatureMismatch => ErrorCode::SignatureMismatch,
            BookingError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            BookingError::Internal(_) => ErrorCode::Unknown,
        }
    }
}

impl From<BookingError> for ErrorResponse {
    fn from(err: BookingError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
