//! Express transit-time availability.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::busday::{business_days_between, format_day};
use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::core::models::{TransitOption, TransitRequest, TransitSchedule};
use crate::error::Result;
use crate::providers::parse_timestamp;
use crate::util::format::service_display;

use super::{CARRIER, ExpressClient, transaction_id};

// =============================================================================
// Wire Schemas
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTransitRequest {
    requested_shipment: WireTransitShipment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTransitShipment {
    shipper: WireParty,
    recipient: WireParty,
    /// "YYYY-MM-DD".
    ship_date_stamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireParty {
    address: WireAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireAddress {
    postal_code: String,
    country_code: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransitReply {
    #[serde(default)]
    pub output: WireTransitOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransitOutput {
    #[serde(default)]
    pub transit_times: Vec<WireTransitTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransitTime {
    #[serde(default)]
    pub service_type: String,

    #[serde(default)]
    pub service_name: Option<String>,

    #[serde(default)]
    pub commit: Option<WireTransitCommit>,

    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransitCommit {
    #[serde(default)]
    pub date_detail: Option<WireTransitDateDetail>,

    #[serde(default)]
    pub time_detail: Option<WireTransitTimeDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransitDateDetail {
    #[serde(default)]
    pub day_format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransitTimeDetail {
    #[serde(default)]
    pub time_format: Option<String>,

    #[serde(default)]
    pub cut_off_time: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

impl ExpressClient {
    /// Fetch raw transit commitments for a lane and ship date.
    pub async fn fetch_transit(
        &self,
        token: &str,
        request: &TransitRequest,
        ship_date: NaiveDate,
    ) -> Result<WireTransitReply> {
        let url = format!("{}/availability/v1/transittimes", self.base_url);
        let body = WireTransitRequest {
            requested_shipment: WireTransitShipment {
                shipper: WireParty {
                    address: WireAddress {
                        postal_code: request.origin_zip.clone(),
                        country_code: "US",
                    },
                },
                recipient: WireParty {
                    address: WireAddress {
                        postal_code: request.destination_zip.clone(),
                        country_code: "US",
                    },
                },
                ship_date_stamp: ship_date.format("%Y-%m-%d").to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-Customer-Transaction-Id", transaction_id("transit"))
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport_error(CARRIER, &e))?;

        if !response.status().is_success() {
            return Err(classify_status(CARRIER, response).await);
        }
        parse_json(CARRIER, response).await
    }
}

// =============================================================================
// Normalize
// =============================================================================

/// Normalize a raw transit reply into a schedule.
///
/// Services without a parseable commitment date are excluded from the
/// schedule and noted instead; the business-day count is derived from the
/// ship date and the committed delivery date.
#[must_use]
pub fn normalize(
    reply: &WireTransitReply,
    request: &TransitRequest,
    ship_date: NaiveDate,
) -> TransitSchedule {
    let mut services = Vec::new();
    let mut notes = Vec::new();

    for transit in &reply.output.transit_times {
        let delivery_date = transit
            .commit
            .as_ref()
            .and_then(|c| c.date_detail.as_ref())
            .and_then(|d| d.day_format.as_deref())
            .and_then(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()))
            });

        let Some(delivery_date) = delivery_date else {
            notes.push(format!(
                "{}: no delivery commitment for this lane",
                transit
                    .service_name
                    .clone()
                    .unwrap_or_else(|| service_display(&transit.service_type))
            ));
            continue;
        };

        let time_detail = transit.commit.as_ref().and_then(|c| c.time_detail.as_ref());
        services.push(TransitOption {
            service_code: transit.service_type.clone(),
            service_name: transit
                .service_name
                .clone()
                .unwrap_or_else(|| service_display(&transit.service_type)),
            delivery_date,
            delivery_day: format_day(delivery_date),
            delivery_time: time_detail.and_then(|t| t.time_format.clone()),
            business_days: business_days_between(ship_date, delivery_date).max(1),
            available: true,
            cutoff_time: time_detail.and_then(|t| t.cut_off_time.clone()),
            notes: transit.notes.clone(),
        });
    }

    services.sort_by_key(|s| s.business_days);

    TransitSchedule {
        origin: request.origin_zip.clone(),
        destination: request.destination_zip.clone(),
        ship_date,
        services,
        notes,
        is_mock_data: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: serde_json::Value) -> WireTransitReply {
        serde_json::from_value(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalizes_and_sorts_by_speed() {
        let reply = reply(json!({
            "output": {
                "transitTimes": [
                    {
                        "serviceType": "EXPRESS_SAVER",
                        "commit": {
                            "dateDetail": { "dayFormat": "2026-03-10" },
                            "timeDetail": { "timeFormat": "by 5:00 PM", "cutOffTime": "17:00" }
                        }
                    },
                    {
                        "serviceType": "PRIORITY_OVERNIGHT",
                        "commit": {
                            "dateDetail": { "dayFormat": "2026-03-06" },
                            "timeDetail": { "timeFormat": "by 10:30 AM" }
                        }
                    }
                ]
            }
        }));

        // Ships Thursday Mar 5
        let schedule = normalize(&reply, &TransitRequest::new("46201", "90001"), date(2026, 3, 5));
        assert_eq!(schedule.services.len(), 2);
        assert_eq!(schedule.services[0].service_code, "PRIORITY_OVERNIGHT");
        assert_eq!(schedule.services[0].business_days, 1);
        assert_eq!(schedule.services[0].delivery_day, "Fri, Mar 6");
        // Mar 10 is the following Tuesday: 3 business days out
        assert_eq!(schedule.services[1].business_days, 3);
        assert_eq!(schedule.services[1].cutoff_time.as_deref(), Some("17:00"));
        assert!(!schedule.is_mock_data);
    }

    #[test]
    fn uncommitted_services_become_notes() {
        let reply = reply(json!({
            "output": {
                "transitTimes": [
                    { "serviceType": "FIRST_OVERNIGHT" }
                ]
            }
        }));
        let schedule = normalize(&reply, &TransitRequest::new("46201", "99501"), date(2026, 3, 5));
        assert!(schedule.services.is_empty());
        assert_eq!(schedule.notes.len(), 1);
        assert!(schedule.notes[0].starts_with("First Overnight"));
    }

    #[test]
    fn same_day_commit_floors_at_one_business_day() {
        let reply = reply(json!({
            "output": {
                "transitTimes": [{
                    "serviceType": "SAME_DAY",
                    "commit": { "dateDetail": { "dayFormat": "2026-03-05" } }
                }]
            }
        }));
        let schedule = normalize(&reply, &TransitRequest::new("46201", "46202"), date(2026, 3, 5));
        assert_eq!(schedule.services[0].business_days, 1);
    }
}
