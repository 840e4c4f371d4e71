//! Postal package tracking.

use serde::Deserialize;

use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::core::models::{
    EventLocation, TrackRequest, TrackingEvent, TrackingEventType, TrackingResult, TrackingStatus,
};
use crate::error::Result;
use crate::providers::parse_timestamp;

use super::{CARRIER, PostalClient};

// =============================================================================
// Wire Schemas
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTrackingReply {
    #[serde(default)]
    pub tracking_number: String,

    #[serde(default)]
    pub status_category: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub status_summary: Option<String>,

    #[serde(default)]
    pub expected_delivery_date: Option<String>,

    #[serde(default)]
    pub tracking_events: Vec<WireTrackingEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTrackingEvent {
    #[serde(default)]
    pub event_type: Option<String>,

    #[serde(default)]
    pub event_timestamp: Option<String>,

    #[serde(default)]
    pub event_city: Option<String>,

    #[serde(default)]
    pub event_state: Option<String>,

    #[serde(default)]
    pub event_country: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

impl PostalClient {
    /// Fetch raw tracking detail. `Ok(None)` means the carrier has no record
    /// of the number.
    pub async fn fetch_tracking(
        &self,
        token: &str,
        request: &TrackRequest,
    ) -> Result<Option<WireTrackingReply>> {
        let url = format!(
            "{}/tracking/v3/tracking/{}",
            self.base_url, request.tracking_number
        );
        let expand = if request.include_detailed_scans {
            "DETAIL"
        } else {
            "SUMMARY"
        };

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("expand", expand)])
            .send()
            .await
            .map_err(|e| classify_transport_error(CARRIER, &e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(classify_status(CARRIER, response).await);
        }
        parse_json(CARRIER, response).await.map(Some)
    }
}

// =============================================================================
// Normalize
// =============================================================================

fn status_from(category: Option<&str>, status: Option<&str>) -> TrackingStatus {
    let label = category.or(status).unwrap_or_default().to_uppercase();
    if label.contains("DELIVERED") {
        TrackingStatus::Delivered
    } else if label.contains("ALERT") || label.contains("EXCEPTION") || label.contains("RETURN") {
        TrackingStatus::Exception
    } else if label.contains("ACCEPT") || label.contains("PRE-SHIPMENT") {
        TrackingStatus::PickedUp
    } else if label.contains("TRANSIT")
        || label.contains("OUT FOR DELIVERY")
        || label.contains("ARRIVED")
        || label.contains("DEPARTED")
    {
        TrackingStatus::InTransit
    } else {
        TrackingStatus::Unknown
    }
}

/// Normalize a raw tracking reply.
#[must_use]
pub fn normalize(reply: &WireTrackingReply, tracking_number: &str) -> TrackingResult {
    let status = status_from(reply.status_category.as_deref(), reply.status.as_deref());
    let status_description = reply
        .status_summary
        .clone()
        .or_else(|| reply.status.clone())
        .unwrap_or_else(|| status.label().to_string());

    let mut events: Vec<TrackingEvent> = reply
        .tracking_events
        .iter()
        .filter_map(|event| {
            let timestamp = event.event_timestamp.as_deref().and_then(parse_timestamp)?;
            let location = event.event_city.clone().map(|city| EventLocation {
                city,
                state_code: event.event_state.clone().unwrap_or_default(),
                country_code: event.event_country.clone().unwrap_or_else(|| "US".to_string()),
            });
            Some(TrackingEvent {
                timestamp,
                event_type: TrackingEventType::from_provider_code(
                    event.event_type.as_deref().unwrap_or_default(),
                ),
                description: event.event_type.clone().unwrap_or_default(),
                location,
            })
        })
        .collect();
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let actual_delivery_date = (status == TrackingStatus::Delivered)
        .then(|| {
            events
                .iter()
                .find(|e| e.event_type == TrackingEventType::Delivery)
                .map(|e| e.timestamp)
        })
        .flatten();

    let current_location = events
        .first()
        .and_then(|e| e.location.as_ref())
        .map(EventLocation::short_label);

    TrackingResult {
        tracking_number: tracking_number.to_string(),
        status,
        status_description,
        estimated_delivery_date: reply
            .expected_delivery_date
            .as_deref()
            .and_then(parse_timestamp),
        actual_delivery_date,
        delivery_signed_by: None,
        current_location,
        events,
        is_mock_data: false,
    }
}
