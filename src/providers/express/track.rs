//! Express package tracking.

use serde::{Deserialize, Serialize};

use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::core::models::{
    EventLocation, TrackRequest, TrackingEvent, TrackingEventType, TrackingResult, TrackingStatus,
};
use crate::error::Result;
use crate::providers::parse_timestamp;

use super::{CARRIER, ExpressClient, transaction_id};

// =============================================================================
// Wire Schemas
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTrackRequest {
    include_detailed_scans: bool,
    tracking_info: Vec<WireTrackingInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTrackingInfo {
    tracking_number_info: WireTrackingNumberInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTrackingNumberInfo {
    tracking_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTrackReply {
    #[serde(default)]
    pub output: WireTrackOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTrackOutput {
    #[serde(default)]
    pub complete_track_results: Vec<WireCompleteTrackResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCompleteTrackResult {
    #[serde(default)]
    pub tracking_number: String,

    #[serde(default)]
    pub track_results: Vec<WireTrackResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTrackResult {
    #[serde(default)]
    pub latest_status_detail: Option<WireStatusDetail>,

    #[serde(default)]
    pub date_and_times: Vec<WireDateAndTime>,

    #[serde(default)]
    pub scan_events: Vec<WireScanEvent>,

    #[serde(default)]
    pub delivery_details: Option<WireDeliveryDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStatusDetail {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDateAndTime {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub date_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireScanEvent {
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub event_type: Option<String>,

    #[serde(default)]
    pub event_description: Option<String>,

    #[serde(default)]
    pub scan_location: Option<WireScanLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireScanLocation {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state_or_province_code: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDeliveryDetails {
    #[serde(default)]
    pub received_by_name: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

impl ExpressClient {
    /// Fetch raw tracking detail. `Ok(None)` means the carrier has no record
    /// of the number, which is a valid answer rather than a failure.
    pub async fn fetch_tracking(
        &self,
        token: &str,
        request: &TrackRequest,
    ) -> Result<Option<WireTrackReply>> {
        let url = format!("{}/track/v1/trackingnumbers", self.base_url);
        let body = WireTrackRequest {
            include_detailed_scans: request.include_detailed_scans,
            tracking_info: vec![WireTrackingInfo {
                tracking_number_info: WireTrackingNumberInfo {
                    tracking_number: request.tracking_number.clone(),
                },
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-Customer-Transaction-Id", transaction_id("track"))
            .json(&body)
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

fn status_from_code(code: Option<&str>) -> TrackingStatus {
    match code.unwrap_or_default().to_uppercase().as_str() {
        "DL" => TrackingStatus::Delivered,
        "PU" => TrackingStatus::PickedUp,
        "DE" | "SE" | "CA" => TrackingStatus::Exception,
        "IT" | "DP" | "AR" | "OD" => TrackingStatus::InTransit,
        _ => TrackingStatus::Unknown,
    }
}

/// Normalize a raw tracking reply.
///
/// Events with unparseable timestamps are dropped; everything else degrades
/// field by field. A reply with no track results normalizes to the unknown
/// result.
#[must_use]
pub fn normalize(reply: &WireTrackReply, tracking_number: &str) -> TrackingResult {
    let Some(track) = reply
        .output
        .complete_track_results
        .first()
        .and_then(|c| c.track_results.first())
    else {
        return TrackingResult::unknown(tracking_number, false);
    };

    let status = status_from_code(track.latest_status_detail.as_ref().and_then(|s| s.code.as_deref()));
    let status_description = track
        .latest_status_detail
        .as_ref()
        .and_then(|s| s.description.clone())
        .unwrap_or_else(|| status.label().to_string());

    let mut estimated_delivery_date = None;
    let mut actual_delivery_date = None;
    for entry in &track.date_and_times {
        match entry.kind.as_str() {
            "ESTIMATED_DELIVERY" => estimated_delivery_date = parse_timestamp(&entry.date_time),
            "ACTUAL_DELIVERY" => actual_delivery_date = parse_timestamp(&entry.date_time),
            _ => {}
        }
    }

    let mut events: Vec<TrackingEvent> = track
        .scan_events
        .iter()
        .filter_map(|scan| {
            let timestamp = scan.date.as_deref().and_then(parse_timestamp)?;
            let location = scan.scan_location.as_ref().and_then(|loc| {
                let city = loc.city.clone()?;
                Some(EventLocation {
                    city,
                    state_code: loc.state_or_province_code.clone().unwrap_or_default(),
                    country_code: loc.country_code.clone().unwrap_or_else(|| "US".to_string()),
                })
            });
            Some(TrackingEvent {
                timestamp,
                event_type: TrackingEventType::from_provider_code(
                    scan.event_type.as_deref().unwrap_or_default(),
                ),
                description: scan.event_description.clone().unwrap_or_default(),
                location,
            })
        })
        .collect();
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let current_location = events
        .first()
        .and_then(|e| e.location.as_ref())
        .map(EventLocation::short_label);

    TrackingResult {
        tracking_number: tracking_number.to_string(),
        status,
        status_description,
        estimated_delivery_date,
        actual_delivery_date,
        delivery_signed_by: track
            .delivery_details
            .as_ref()
            .and_then(|d| d.received_by_name.clone()),
        current_location,
        events,
        is_mock_data: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: serde_json::Value) -> WireTrackReply {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalizes_delivered_package() {
        let reply = reply(json!({
            "output": {
                "completeTrackResults": [{
                    "trackingNumber": "794658201330",
                    "trackResults": [{
                        "latestStatusDetail": { "code": "DL", "description": "Delivered" },
                        "dateAndTimes": [
                            { "type": "ACTUAL_DELIVERY", "dateTime": "2026-03-06T14:22:00Z" }
                        ],
                        "deliveryDetails": { "receivedByName": "J.SMITH" },
                        "scanEvents": [
                            {
                                "date": "2026-03-04T09:00:00Z",
                                "eventType": "PU",
                                "eventDescription": "Picked up",
                                "scanLocation": { "city": "Indianapolis", "stateOrProvinceCode": "IN" }
                            },
                            {
                                "date": "2026-03-06T14:22:00Z",
                                "eventType": "DL",
                                "eventDescription": "Delivered",
                                "scanLocation": { "city": "Los Angeles", "stateOrProvinceCode": "CA" }
                            }
                        ]
                    }]
                }]
            }
        }));

        let result = normalize(&reply, "794658201330");
        assert_eq!(result.status, TrackingStatus::Delivered);
        assert_eq!(result.delivery_signed_by.as_deref(), Some("J.SMITH"));
        assert!(result.actual_delivery_date.is_some());
        assert_eq!(result.events.len(), 2);
        assert_eq!(result.events[0].event_type, TrackingEventType::Delivery);
        assert_eq!(result.current_location.as_deref(), Some("Los Angeles, CA"));
        assert!(!result.is_mock_data);
    }

    #[test]
    fn empty_reply_is_unknown_not_error() {
        let reply = reply(json!({ "output": { "completeTrackResults": [] } }));
        let result = normalize(&reply, "999999999999");
        assert_eq!(result.status, TrackingStatus::Unknown);
        assert!(result.events.is_empty());
    }

    #[test]
    fn unrecognized_status_code_maps_to_unknown() {
        let reply = reply(json!({
            "output": {
                "completeTrackResults": [{
                    "trackResults": [{
                        "latestStatusDetail": { "code": "ZZ" }
                    }]
                }]
            }
        }));
        let result = normalize(&reply, "794658201330");
        assert_eq!(result.status, TrackingStatus::Unknown);
        assert_eq!(result.status_description, "Unknown");
    }

    #[test]
    fn drops_events_with_unparseable_timestamps() {
        let reply = reply(json!({
            "output": {
                "completeTrackResults": [{
                    "trackResults": [{
                        "latestStatusDetail": { "code": "IT" },
                        "scanEvents": [
                            { "date": "not a date", "eventType": "AR" },
                            { "date": "2026-03-05T03:14:00Z", "eventType": "AR" }
                        ]
                    }]
                }]
            }
        }));
        let result = normalize(&reply, "794658201330");
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.status, TrackingStatus::InTransit);
    }
}
