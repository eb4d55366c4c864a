//! Wire-level error codes for the booking platform
//!
//! Error codes are shared between the engine and any transport layer.
//! They are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Booking errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// Represented as u16 values for efficient serialization and
/// cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,

    // ==================== 2xxx: Permission ====================
    /// Caller is neither the owner nor an administrator
    AccessDenied = 2001,

    // ==================== 4xxx: Booking ====================
    /// Required field missing or not parseable
    MalformedRequest = 4001,
    /// Check-out not strictly after check-in
    InvalidDateRange = 4002,
    /// Check-in before the current calendar day
    PastCheckIn = 4003,
    /// Referenced property does not exist
    PropertyNotFound = 4004,
    /// Guest count exceeds the property limit
    GuestLimitExceeded = 4005,
    /// Dates overlap an existing pending or confirmed booking
    BookingConflict = 4006,
    /// Booking does not exist
    BookingNotFound = 4007,
    /// Requested status transition is not allowed
    InvalidTransition = 4008,
    /// Booking is already cancelled
    AlreadyCancelled = 4009,

    // ==================== 5xxx: Payment ====================
    /// Payment order requires a pending booking
    BookingNotPending = 5001,
    /// Supplied signature does not match the expected HMAC
    SignatureMismatch = 5002,

    // ==================== 9xxx: System ====================
    /// Transient store or gateway failure; caller may retry with backoff
    StoreUnavailable = 9001,
}

impl ErrorCode {
    /// Whether a caller may retry the same request without changing it.
    ///
    /// Only transient infrastructure failures qualify; every business-rule
    /// rejection is terminal for that request.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorCode::StoreUnavailable)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error when converting from an unassigned u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2001 => ErrorCode::AccessDenied,
            4001 => ErrorCode::MalformedRequest,
            4002 => ErrorCode::InvalidDateRange,
            4003 => ErrorCode::PastCheckIn,
            4004 => ErrorCode::PropertyNotFound,
            4005 => ErrorCode::GuestLimitExceeded,
            4006 => ErrorCode::BookingConflict,
            4007 => ErrorCode::BookingNotFound,
            4008 => ErrorCode::InvalidTransition,
            4009 => ErrorCode::AlreadyCancelled,
            5001 => ErrorCode::BookingNotPending,
            5002 => ErrorCode::SignatureMismatch,
            9001 => ErrorCode::StoreUnavailable,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, *self as u16)
    }
}

/// Error payload handed to the transport layer: a stable code plus a
/// human-readable message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
