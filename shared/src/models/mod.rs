//! Domain models for the booking engine
//!
//! - **property**: rental property referenced by bookings
//! - **booking**: booking record and its status lifecycle
//! - **stay**: half-open calendar date interval with overlap arithmetic

pub mod booking;
pub mod property;
pub mod stay;

pub use booking::{Booking, BookingStatus};
pub use property::Property;
pub use stay::StayRange;
