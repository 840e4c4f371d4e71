//! Express rate quotes.

use serde::{Deserialize, Serialize};

use crate::core::busday::format_day;
use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::core::models::{RateQuote, RateRequest, RateTier};
use crate::error::Result;
use crate::providers::parse_timestamp;
use crate::util::format::service_display;

use super::{CARRIER, ExpressClient, transaction_id};

// =============================================================================
// Wire Schemas
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRateRequest {
    requested_shipment: WireRequestedShipment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequestedShipment {
    shipper: WireParty,
    recipient: WireParty,
    pickup_type: &'static str,
    rate_request_type: Vec<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    service_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    packaging_type: Option<String>,

    requested_package_line_items: Vec<WirePackageLineItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireParty {
    address: WirePartyAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePartyAddress {
    postal_code: String,
    country_code: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePackageLineItem {
    weight: WireWeight,

    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<WireDimensions>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireWeight {
    units: &'static str,
    value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireDimensions {
    length: f64,
    width: f64,
    height: f64,
    units: &'static str,
}

/// Top-level rate reply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRateReply {
    #[serde(default)]
    pub output: WireRateOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRateOutput {
    #[serde(default)]
    pub rate_reply_details: Vec<WireRateReplyDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRateReplyDetail {
    #[serde(default)]
    pub service_type: String,

    #[serde(default)]
    pub service_name: Option<String>,

    #[serde(default)]
    pub rated_shipment_details: Vec<WireRatedShipmentDetail>,

    #[serde(default)]
    pub commit: Option<WireCommit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRatedShipmentDetail {
    #[serde(default)]
    pub rate_type: Option<String>,

    #[serde(default)]
    pub total_net_charge: Option<f64>,

    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCommit {
    #[serde(default)]
    pub date_detail: Option<WireDateDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDateDetail {
    #[serde(default)]
    pub day_of_week: Option<String>,

    #[serde(default)]
    pub day_format: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

fn build_wire_request(request: &RateRequest) -> WireRateRequest {
    let dimensions = if request.has_dimensions() {
        Some(WireDimensions {
            length: request.length.unwrap_or_default(),
            width: request.width.unwrap_or_default(),
            height: request.height.unwrap_or_default(),
            units: "IN",
        })
    } else {
        None
    };

    WireRateRequest {
        requested_shipment: WireRequestedShipment {
            shipper: WireParty {
                address: WirePartyAddress {
                    postal_code: request.origin_zip.clone(),
                    country_code: "US",
                },
            },
            recipient: WireParty {
                address: WirePartyAddress {
                    postal_code: request.destination_zip.clone(),
                    country_code: "US",
                },
            },
            pickup_type: "DROPOFF_AT_CARRIER_LOCATION",
            rate_request_type: vec!["ACCOUNT", "LIST"],
            service_type: request.service_type.clone(),
            packaging_type: request.package_type.clone(),
            requested_package_line_items: vec![WirePackageLineItem {
                weight: WireWeight {
                    units: "LB",
                    value: request.weight,
                },
                dimensions,
            }],
        },
    }
}

impl ExpressClient {
    /// Fetch raw rate quotes for a lane and package.
    pub async fn fetch_rates(&self, token: &str, request: &RateRequest) -> Result<WireRateReply> {
        let url = format!("{}/rate/v1/rates/quotes", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-Customer-Transaction-Id", transaction_id("rate"))
            .json(&build_wire_request(request))
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

/// Normalize a raw rate reply into quotes.
///
/// Per service: prefer the account-tier charge, fall back to the first
/// charge present; services with no usable charge are dropped. A missing
/// commitment degrades to a "Contact carrier" transit descriptor.
#[must_use]
pub fn normalize(reply: &WireRateReply) -> Vec<RateQuote> {
    let mut quotes = Vec::with_capacity(reply.output.rate_reply_details.len());

    for detail in &reply.output.rate_reply_details {
        let preferred = detail
            .rated_shipment_details
            .iter()
            .find(|d| {
                d.rate_type
                    .as_deref()
                    .is_some_and(|t| t.contains("ACCOUNT"))
            })
            .or_else(|| detail.rated_shipment_details.first());

        let Some(rated) = preferred else {
            continue;
        };
        let Some(charge) = rated.total_net_charge.filter(|c| c.is_finite() && *c >= 0.0) else {
            continue;
        };

        let rate_type = rated.rate_type.as_deref().map(|t| {
            if t.contains("ACCOUNT") {
                RateTier::Account
            } else {
                RateTier::List
            }
        });

        let date_detail = detail.commit.as_ref().and_then(|c| c.date_detail.as_ref());
        let delivery_date = date_detail
            .and_then(|d| d.day_format.as_deref())
            .and_then(parse_timestamp);
        let transit_time = date_detail
            .and_then(|d| d.day_format.clone())
            .unwrap_or_else(|| "Contact carrier".to_string());
        let delivery_day = date_detail
            .and_then(|d| d.day_of_week.clone())
            .or_else(|| delivery_date.map(|d| format_day(d.date_naive())));

        quotes.push(RateQuote {
            carrier: CARRIER.display_name().to_string(),
            service_name: detail
                .service_name
                .clone()
                .unwrap_or_else(|| service_display(&detail.service_type)),
            service_code: detail.service_type.clone(),
            total_charge: charge,
            currency: rated.currency.clone().unwrap_or_else(|| "USD".to_string()),
            transit_time,
            delivery_date,
            delivery_day,
            delivery_time: None,
            rate_type,
            business_days: None,
            is_mock_data: false,
        });
    }

    quotes
}
