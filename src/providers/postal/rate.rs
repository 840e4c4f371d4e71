//! Postal base-rate search.

use serde::{Deserialize, Serialize};

use crate::core::models::{RateQuote, RateRequest, RateTier};
use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::error::Result;
use crate::util::format::service_display;

use super::{CARRIER, PostalClient};

// =============================================================================
// Wire Schemas
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRateSearchRequest {
    #[serde(rename = "originZIPCode")]
    origin_zip_code: String,

    #[serde(rename = "destinationZIPCode")]
    destination_zip_code: String,

    /// Pounds.
    weight: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f64>,

    mail_class: String,
    price_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRateSearchReply {
    #[serde(default)]
    pub rates: Vec<WireRate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRate {
    #[serde(default)]
    pub mail_class: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub price_type: Option<String>,

    #[serde(default)]
    pub zone: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

impl PostalClient {
    /// Search base rates for a lane and weight across all mail classes.
    pub async fn fetch_rates(
        &self,
        token: &str,
        request: &RateRequest,
    ) -> Result<WireRateSearchReply> {
        let url = format!("{}/prices/v3/base-rates/search", self.base_url);
        let body = WireRateSearchRequest {
            origin_zip_code: request.origin_zip.clone(),
            destination_zip_code: request.destination_zip.clone(),
            weight: request.weight,
            length: request.length,
            width: request.width,
            height: request.height,
            mail_class: request
                .service_type
                .clone()
                .unwrap_or_else(|| "ALL".to_string()),
            price_type: "RETAIL",
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
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

/// Base-rate replies carry no delivery commitment, so the transit descriptor
/// comes from the published service standard for the mail class.
fn class_transit(mail_class: &str) -> &'static str {
    match mail_class {
        "PRIORITY_MAIL_EXPRESS" => "1-2 business days",
        "PRIORITY_MAIL" => "1-3 business days",
        "GROUND_ADVANTAGE" => "2-5 business days",
        "FIRST_CLASS_MAIL" => "1-5 business days",
        _ => "Contact carrier",
    }
}

/// Normalize a raw base-rate reply into quotes. Entries without a usable
/// price are dropped.
#[must_use]
pub fn normalize(reply: &WireRateSearchReply) -> Vec<RateQuote> {
    reply
        .rates
        .iter()
        .filter_map(|rate| {
            let price = rate.price.filter(|p| p.is_finite() && *p >= 0.0)?;
            let rate_type = rate.price_type.as_deref().map(|t| {
                if t.eq_ignore_ascii_case("COMMERCIAL") {
                    RateTier::Account
                } else {
                    RateTier::List
                }
            });
            Some(RateQuote {
                carrier: CARRIER.display_name().to_string(),
                service_name: rate
                    .description
                    .clone()
                    .unwrap_or_else(|| service_display(&rate.mail_class)),
                service_code: rate.mail_class.clone(),
                total_charge: price,
                currency: "USD".to_string(),
                transit_time: class_transit(&rate.mail_class).to_string(),
                delivery_date: None,
                delivery_day: None,
                delivery_time: None,
                rate_type,
                business_days: None,
                is_mock_data: false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: serde_json::Value) -> WireRateSearchReply {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalizes_priced_classes() {
        let reply = reply(json!({
            "rates": [
                {
                    "mailClass": "PRIORITY_MAIL",
                    "description": "Priority Mail",
                    "price": 9.65,
                    "priceType": "RETAIL",
                    "zone": "04"
                },
                {
                    "mailClass": "GROUND_ADVANTAGE",
                    "price": 5.40,
                    "priceType": "COMMERCIAL"
                }
            ]
        }));

        let quotes = normalize(&reply);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].service_name, "Priority Mail");
        assert_eq!(quotes[0].transit_time, "1-3 business days");
        assert_eq!(quotes[0].rate_type, Some(RateTier::List));
        assert_eq!(quotes[1].service_name, "Ground Advantage");
        assert_eq!(quotes[1].rate_type, Some(RateTier::Account));
    }

    #[test]
    fn drops_unpriced_entries() {
        let reply = reply(json!({
            "rates": [
                { "mailClass": "PRIORITY_MAIL" },
                { "mailClass": "MEDIA_MAIL", "price": -1.0 }
            ]
        }));
        assert!(normalize(&reply).is_empty());
    }

    #[test]
    fn unknown_class_degrades_transit_descriptor() {
        let reply = reply(json!({
            "rates": [{ "mailClass": "PARCEL_SELECT", "price": 8.00 }]
        }));
        let quotes = normalize(&reply);
        assert_eq!(quotes[0].transit_time, "Contact carrier");
        assert_eq!(quotes[0].service_name, "Parcel Select");
    }
}
