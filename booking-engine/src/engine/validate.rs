//! Booking request validation
//!
//! Checks run in a fixed order and short-circuit on the first failure, so
//! a multiply-invalid request always surfaces the same single error:
//! presence/format, then date ordering, then past check-in, then (in the
//! engine, after the property lookup) the guest limit.

use crate::error::{BookingError, BookingResult};
use chrono::NaiveDate;
use shared::{BookingRequest, Property, StayRange};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request with presence, format and date rules already enforced.
/// The guest limit still needs the property, checked separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub property_id: String,
    pub stay: StayRange,
    pub guests: u32,
}

/// Steps 1-3: field presence and format, date ordering, past check-in.
///
/// `today` is the calendar day at request time; comparison is date-only.
pub fn parse_request(request: &BookingRequest, today: NaiveDate) -> BookingResult<NormalizedRequest> {
    let (Some(property_id), Some(check_in), Some(check_out), Some(guests)) = (
        request.property_id.as_deref(),
        request.check_in.as_deref(),
        request.check_out.as_deref(),
        request.guests,
    ) else {
        return Err(BookingError::MalformedRequest(
            "Missing required fields: propertyId, checkIn, checkOut, guests".into(),
        ));
    };

    if property_id.is_empty() {
        return Err(BookingError::MalformedRequest(
            "propertyId must not be empty".into(),
        ));
    }

    let guests: u32 = guests
        .try_into()
        .ok()
        .filter(|g| *g > 0)
        .ok_or_else(|| BookingError::MalformedRequest("Guests must be a positive number".into()))?;

    let check_in = parse_date(check_in)?;
    let check_out = parse_date(check_out)?;

    if check_out <= check_in {
        return Err(BookingError::InvalidDateRange);
    }

    if check_in < today {
        return Err(BookingError::PastCheckIn);
    }

    Ok(NormalizedRequest {
        property_id: property_id.to_string(),
        stay: StayRange::new(check_in, check_out),
        guests,
    })
}

/// Step 5: guest count against the property's limit
pub fn check_guest_limit(property: &Property, guests: u32) -> BookingResult<()> {
    if guests > property.max_guests {
        return Err(BookingError::GuestLimitExceeded {
            max_guests: property.max_guests,
        });
    }
    Ok(())
}

fn parse_date(raw: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| BookingError::MalformedRequest(format!("Invalid date format: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        "2024-06-01".parse().unwrap()
    }

    fn request(check_in: &str, check_out: &str, guests: i64) -> BookingRequest {
        BookingRequest {
            property_id: Some("prop-1".into()),
            check_in: Some(check_in.into()),
            check_out: Some(check_out.into()),
            guests: Some(guests),
        }
    }

    #[test]
    fn valid_request_normalizes() {
        let normalized = parse_request(&request("2024-06-10", "2024-06-14", 2), today()).unwrap();
        assert_eq!(normalized.property_id, "prop-1");
        assert_eq!(normalized.stay.nights(), 4);
        assert_eq!(normalized.guests, 2);
    }

    #[test]
    fn missing_field_is_malformed() {
        let mut req = request("2024-06-10", "2024-06-14", 2);
        req.check_out = None;
        assert!(matches!(
            parse_request(&req, today()),
            Err(BookingError::MalformedRequest(_))
        ));
    }

    #[test]
    fn unparseable_date_is_malformed() {
        assert!(matches!(
            parse_request(&request("June 10th", "2024-06-14", 2), today()),
            Err(BookingError::MalformedRequest(_))
        ));
    }

    #[test]
    fn non_positive_guests_is_malformed() {
        for guests in [0, -3] {
            assert!(matches!(
                parse_request(&request("2024-06-10", "2024-06-14", guests), today()),
                Err(BookingError::MalformedRequest(_))
            ));
        }
    }

    #[test]
    fn inverted_or_empty_range_is_rejected() {
        assert!(matches!(
            parse_request(&request("2024-06-14", "2024-06-10", 2), today()),
            Err(BookingError::InvalidDateRange)
        ));
        // Zero-night stay
        assert!(matches!(
            parse_request(&request("2024-06-10", "2024-06-10", 2), today()),
            Err(BookingError::InvalidDateRange)
        ));
    }

    #[test]
    fn past_check_in_is_rejected_but_today_is_fine() {
        assert!(matches!(
            parse_request(&request("2024-05-20", "2024-06-10", 2), today()),
            Err(BookingError::PastCheckIn)
        ));
        assert!(parse_request(&request("2024-06-01", "2024-06-03", 2), today()).is_ok());
    }

    #[test]
    fn first_failing_check_wins() {
        // Malformed guests beats the inverted range
        assert!(matches!(
            parse_request(&request("2024-06-14", "2024-06-10", 0), today()),
            Err(BookingError::MalformedRequest(_))
        ));
        // Inverted range beats the past check-in
        assert!(matches!(
            parse_request(&request("2024-05-20", "2024-05-10", 2), today()),
            Err(BookingError::InvalidDateRange)
        ));
    }

    #[test]
    fn guest_limit_checked_against_property() {
        let property = Property::new("host-1", Decimal::from(100), 4);
        assert!(check_guest_limit(&property, 4).is_ok());
        match check_guest_limit(&property, 5) {
            Err(BookingError::GuestLimitExceeded { max_guests }) => assert_eq!(max_guests, 4),
            other => panic!("expected guest limit error, got {other:?}"),
        }
    }
}
