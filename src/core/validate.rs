//! Caller input validation.
//!
//! Runs before mode resolution and before any network call, so malformed
//! input is the cheapest failure path. Bounds mirror the carriers' published
//! limits (ground service tops out at 150 lb).

use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::{AddressRequest, RateRequest, TrackRequest, TransitRequest};
use crate::error::{Result, ShipError};

/// Minimum billable weight in pounds.
pub const MIN_WEIGHT_LB: f64 = 0.1;

/// Maximum ground-service weight in pounds.
pub const MAX_WEIGHT_LB: f64 = 150.0;

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid zip pattern"));

static STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid state pattern"));

static TRACKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{8,34}$").expect("valid tracking pattern"));

fn invalid(field: &str, message: &str) -> ShipError {
    ShipError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn check_zip(field: &str, value: &str) -> Result<()> {
    if ZIP_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid(field, "ZIP code must be 5 or 9 digits"))
    }
}

/// Validate a rate request.
pub fn rate_request(request: &RateRequest) -> Result<()> {
    check_zip("originZip", &request.origin_zip)?;
    check_zip("destinationZip", &request.destination_zip)?;

    if !request.weight.is_finite()
        || request.weight < MIN_WEIGHT_LB
        || request.weight > MAX_WEIGHT_LB
    {
        return Err(invalid(
            "weight",
            "weight must be between 0.1 and 150 pounds",
        ));
    }

    for (name, dim) in [
        ("length", request.length),
        ("width", request.width),
        ("height", request.height),
    ] {
        if let Some(v) = dim {
            if !v.is_finite() || v <= 0.0 {
                return Err(invalid(name, "dimension must be a positive number"));
            }
        }
    }

    Ok(())
}

/// Validate a tracking request.
pub fn track_request(request: &TrackRequest) -> Result<()> {
    if TRACKING_RE.is_match(&request.tracking_number) {
        Ok(())
    } else {
        Err(invalid(
            "trackingNumber",
            "tracking number must be 8-34 alphanumeric characters",
        ))
    }
}

/// Validate a transit-time request.
pub fn transit_request(request: &TransitRequest) -> Result<()> {
    check_zip("originZip", &request.origin_zip)?;
    check_zip("destinationZip", &request.destination_zip)
}

/// Validate an address-validation request.
pub fn address_request(request: &AddressRequest) -> Result<()> {
    if request.street.trim().is_empty() {
        return Err(invalid("street", "street address is required"));
    }
    if request.city.trim().is_empty() {
        return Err(invalid("city", "city is required"));
    }
    if !STATE_RE.is_match(&request.state) {
        return Err(invalid("state", "state must be a 2-letter code"));
    }
    check_zip("zip", &request.zip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_plus4_zips() {
        assert!(rate_request(&RateRequest::new("44101", "60601", 5.0)).is_ok());
        assert!(rate_request(&RateRequest::new("44101-1234", "60601", 5.0)).is_ok());
    }

    #[test]
    fn rejects_bad_zip() {
        let err = rate_request(&RateRequest::new("4410", "60601", 5.0)).unwrap_err();
        assert!(matches!(err, ShipError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_out_of_range_weight() {
        assert!(rate_request(&RateRequest::new("44101", "60601", 0.0)).is_err());
        assert!(rate_request(&RateRequest::new("44101", "60601", 2500.0)).is_err());
        assert!(rate_request(&RateRequest::new("44101", "60601", f64::NAN)).is_err());
        assert!(rate_request(&RateRequest::new("44101", "60601", 150.0)).is_ok());
    }

    #[test]
    fn rejects_nonpositive_dimensions() {
        let mut request = RateRequest::new("44101", "60601", 5.0);
        request.length = Some(0.0);
        assert!(rate_request(&request).is_err());
    }

    #[test]
    fn tracking_number_shape() {
        assert!(track_request(&TrackRequest::new("794658201330")).is_ok());
        assert!(track_request(&TrackRequest::new("short")).is_err());
        assert!(track_request(&TrackRequest::new("has spaces here")).is_err());
    }

    #[test]
    fn address_field_checks() {
        assert!(address_request(&AddressRequest::new("1 Main St", "Akron", "OH", "44101")).is_ok());
        assert!(address_request(&AddressRequest::new("", "Akron", "OH", "44101")).is_err());
        assert!(
            address_request(&AddressRequest::new("1 Main St", "Akron", "Ohio", "44101")).is_err()
        );
        assert!(address_request(&AddressRequest::new("1 Main St", "Akron", "OH", "441")).is_err());
    }
}
