//! Internal data model.
//!
//! Canonical request and result shapes shared by the live provider clients
//! and the fallback synthesizer. Every result type carries an explicit
//! `is_mock_data` flag so callers can disclose non-live data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Requests
// =============================================================================

/// Normalized rate request (validated before reaching a provider client).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub origin_zip: String,
    pub destination_zip: String,
    /// Package weight in pounds.
    pub weight: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

impl RateRequest {
    /// Minimal request with only the required fields.
    #[must_use]
    pub fn new(origin_zip: &str, destination_zip: &str, weight: f64) -> Self {
        Self {
            origin_zip: origin_zip.to_string(),
            destination_zip: destination_zip.to_string(),
            weight,
            length: None,
            width: None,
            height: None,
            package_type: None,
            service_type: None,
        }
    }

    /// Whether all three dimensions are present.
    #[must_use]
    pub const fn has_dimensions(&self) -> bool {
        self.length.is_some() && self.width.is_some() && self.height.is_some()
    }
}

/// Normalized tracking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub tracking_number: String,

    #[serde(default = "default_true")]
    pub include_detailed_scans: bool,
}

const fn default_true() -> bool {
    true
}

impl TrackRequest {
    #[must_use]
    pub fn new(tracking_number: &str) -> Self {
        Self {
            tracking_number: tracking_number.to_string(),
            include_detailed_scans: true,
        }
    }
}

/// Normalized transit-time request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRequest {
    pub origin_zip: String,
    pub destination_zip: String,

    /// Defaults to the next calendar day when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<NaiveDate>,
}

impl TransitRequest {
    #[must_use]
    pub fn new(origin_zip: &str, destination_zip: &str) -> Self {
        Self {
            origin_zip: origin_zip.to_string(),
            destination_zip: destination_zip.to_string(),
            ship_date: None,
        }
    }

    /// Resolve the effective ship date: the explicit one, or tomorrow.
    #[must_use]
    pub fn effective_ship_date(&self, today: NaiveDate) -> NaiveDate {
        self.ship_date
            .unwrap_or_else(|| today.succ_opt().unwrap_or(today))
    }
}

/// Normalized address-validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub street: String,
    pub city: String,
    /// Two-letter region code.
    pub state: String,
    pub zip: String,

    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "US".to_string()
}

impl AddressRequest {
    #[must_use]
    pub fn new(street: &str, city: &str, state: &str, zip: &str) -> Self {
        Self {
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
            country: default_country(),
        }
    }
}

// =============================================================================
// Rate Quotes
// =============================================================================

/// Account-specific vs. list pricing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateTier {
    Account,
    List,
}

/// A single normalized rate quote.
///
/// Invariants upheld by the normalizer and synthesizer: `total_charge >= 0`;
/// `business_days`, when present, is at least 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub carrier: String,
    pub service_name: String,
    pub service_code: String,
    pub total_charge: f64,
    pub currency: String,

    /// Free-text transit descriptor (e.g., "2 business days").
    pub transit_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,

    /// Short formatted day, e.g. "Thu, Jul 17".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_day: Option<String>,

    /// Commitment time, e.g. "by 10:30 AM".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_type: Option<RateTier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_days: Option<u32>,

    pub is_mock_data: bool,
}

// =============================================================================
// Tracking
// =============================================================================

/// Closed set of tracking event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingEventType {
    Pickup,
    Departure,
    Arrival,
    OnVehicle,
    Delivery,
    Exception,
    Other,
}

impl TrackingEventType {
    /// Map a provider scan code to the closed set. Unrecognized codes map
    /// to `Other`, never to a failure.
    #[must_use]
    pub fn from_provider_code(code: &str) -> Self {
        match code.to_uppercase().as_str() {
            "PU" | "PICKUP" => Self::Pickup,
            "DP" | "DEPARTURE" | "DEPARTED" => Self::Departure,
            "AR" | "ARRIVAL" | "ARRIVED" => Self::Arrival,
            "OD" | "ON_VEHICLE" | "OUT_FOR_DELIVERY" => Self::OnVehicle,
            "DL" | "DELIVERY" | "DELIVERED" => Self::Delivery,
            "DE" | "SE" | "EXCEPTION" => Self::Exception,
            _ => Self::Other,
        }
    }
}

/// Scan location for a tracking event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    pub city: String,
    pub state_code: String,
    pub country_code: String,
}

impl EventLocation {
    #[must_use]
    pub fn us(city: &str, state_code: &str) -> Self {
        Self {
            city: city.to_string(),
            state_code: state_code.to_string(),
            country_code: "US".to_string(),
        }
    }

    /// "City, ST" display form.
    #[must_use]
    pub fn short_label(&self) -> String {
        format!("{}, {}", self.city, self.state_code)
    }
}

/// A single tracking scan event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: TrackingEventType,
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
}

/// Closed set of package statuses. Terminal states are `Delivered` and
/// `Exception`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingStatus {
    Delivered,
    InTransit,
    PickedUp,
    Exception,
    #[default]
    Unknown,
}

impl TrackingStatus {
    /// Whether no further status transitions are expected.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Exception)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivered => "Delivered",
            Self::InTransit => "In Transit",
            Self::PickedUp => "Picked Up",
            Self::Exception => "Exception",
            Self::Unknown => "Unknown",
        }
    }
}

/// Normalized tracking result.
///
/// `events` is ordered most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResult {
    pub tracking_number: String,
    pub status: TrackingStatus,
    pub status_description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_signed_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,

    pub events: Vec<TrackingEvent>,

    pub is_mock_data: bool,
}

impl TrackingResult {
    /// Empty result for a tracking number the carrier does not recognize.
    ///
    /// A missing record is a valid answer, not an error.
    #[must_use]
    pub fn unknown(tracking_number: &str, is_mock_data: bool) -> Self {
        Self {
            tracking_number: tracking_number.to_string(),
            status: TrackingStatus::Unknown,
            status_description: "No tracking information available".to_string(),
            estimated_delivery_date: None,
            actual_delivery_date: None,
            delivery_signed_by: None,
            current_location: None,
            events: Vec::new(),
            is_mock_data,
        }
    }
}

// =============================================================================
// Transit Times
// =============================================================================

/// One service option for a lane, with its computed delivery commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitOption {
    pub service_code: String,
    pub service_name: String,
    pub delivery_date: NaiveDate,

    /// Short formatted day, e.g. "Thu, Jul 17".
    pub delivery_day: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,

    pub business_days: u32,
    pub available: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Transit schedule for a lane: available options sorted by speed.
///
/// Unavailable options are excluded from `services`; the exclusion reason
/// lands in `notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitSchedule {
    pub origin: String,
    pub destination: String,
    pub ship_date: NaiveDate,
    pub services: Vec<TransitOption>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,

    pub is_mock_data: bool,
}

// =============================================================================
// Address Validation
// =============================================================================

/// Validation confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Carrier-standardized postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardizedAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Normalized address-validation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValidationResult {
    pub is_valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub standardized: Option<StandardizedAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<bool>,

    /// Human-readable fixes when the address is invalid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    pub is_mock_data: bool,
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Echo of the key rate-request fields, returned alongside the quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequestEcho {
    pub origin: String,
    pub destination: String,
    pub weight: f64,
}

/// Envelope for a rate lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub rates: Vec<RateQuote>,
    pub request: RateRequestEcho,
    pub is_mock_data: bool,
}

/// Envelope for a tracking lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub result: TrackingResult,
    pub is_mock_data: bool,
}

/// Envelope for a transit-time lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitResponse {
    pub schedule: TransitSchedule,
    pub is_mock_data: bool,
}

/// Envelope for an address validation, tagged with the carrier that
/// produced it so multi-provider comparisons stay attributable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub result: AddressValidationResult,
    pub provider: String,
    pub is_mock_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_type_from_provider_code_defaults_to_other() {
        assert_eq!(
            TrackingEventType::from_provider_code("DL"),
            TrackingEventType::Delivery
        );
        assert_eq!(
            TrackingEventType::from_provider_code("pickup"),
            TrackingEventType::Pickup
        );
        assert_eq!(
            TrackingEventType::from_provider_code("ZZ_NEW_CODE"),
            TrackingEventType::Other
        );
    }

    #[test]
    fn terminal_statuses() {
        assert!(TrackingStatus::Delivered.is_terminal());
        assert!(TrackingStatus::Exception.is_terminal());
        assert!(!TrackingStatus::InTransit.is_terminal());
        assert!(!TrackingStatus::Unknown.is_terminal());
    }

    #[test]
    fn unknown_tracking_result_is_empty() {
        let result = TrackingResult::unknown("123456789", true);
        assert_eq!(result.status, TrackingStatus::Unknown);
        assert!(result.events.is_empty());
        assert!(result.is_mock_data);
    }

    #[test]
    fn transit_request_defaults_to_next_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let request = TransitRequest::new("44101", "60601");
        assert_eq!(
            request.effective_ship_date(today),
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
        );

        let explicit = TransitRequest {
            ship_date: Some(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()),
            ..request
        };
        assert_eq!(
            explicit.effective_ship_date(today),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
        );
    }

    #[test]
    fn rate_quote_serializes_camel_case() {
        let quote = RateQuote {
            carrier: "Express".to_string(),
            service_name: "Express Saver".to_string(),
            service_code: "EXPRESS_SAVER".to_string(),
            total_charge: 31.42,
            currency: "USD".to_string(),
            transit_time: "3 business days".to_string(),
            delivery_date: Some(Utc.with_ymd_and_hms(2026, 3, 6, 17, 0, 0).unwrap()),
            delivery_day: Some("Fri, Mar 6".to_string()),
            delivery_time: Some("by 5:00 PM".to_string()),
            rate_type: Some(RateTier::Account),
            business_days: Some(3),
            is_mock_data: false,
        };
        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("totalCharge"));
        assert!(json.contains("isMockData"));
        assert!(json.contains("\"rateType\":\"ACCOUNT\""));
    }

    #[test]
    fn address_result_skips_empty_suggestions() {
        let result = AddressValidationResult {
            is_valid: true,
            standardized: None,
            confidence: Some(Confidence::Medium),
            deliverable: Some(true),
            suggestions: Vec::new(),
            is_mock_data: true,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("suggestions"));
    }
}
