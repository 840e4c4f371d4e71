//! Express address resolution.

use serde::{Deserialize, Serialize};

use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::core::models::{AddressRequest, AddressValidationResult, Confidence, StandardizedAddress};
use crate::error::Result;

use super::{CARRIER, ExpressClient, transaction_id};

// =============================================================================
// Wire Schemas
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireResolveRequest {
    addresses_to_validate: Vec<WireAddressToValidate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireAddressToValidate {
    address: WireRequestAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequestAddress {
    street_lines: Vec<String>,
    city: String,
    state_or_province_code: String,
    postal_code: String,
    country_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResolveReply {
    #[serde(default)]
    pub output: WireResolveOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResolveOutput {
    #[serde(default)]
    pub resolved_addresses: Vec<WireResolvedAddress>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResolvedAddress {
    #[serde(default)]
    pub street_lines_token: Vec<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state_or_province_code: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    /// "BUSINESS", "RESIDENTIAL", "MIXED", or "UNKNOWN".
    #[serde(default)]
    pub classification: Option<String>,

    #[serde(default)]
    pub attributes: Option<WireAddressAttributes>,
}

/// Attribute values arrive as strings ("true"/"false"), not booleans.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAddressAttributes {
    #[serde(rename = "dPV", default)]
    pub dpv: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

impl ExpressClient {
    /// Resolve an address against the carrier's reference data.
    pub async fn fetch_address(
        &self,
        token: &str,
        request: &AddressRequest,
    ) -> Result<WireResolveReply> {
        let url = format!("{}/address/v1/addresses/resolve", self.base_url);
        let body = WireResolveRequest {
            addresses_to_validate: vec![WireAddressToValidate {
                address: WireRequestAddress {
                    street_lines: vec![request.street.clone()],
                    city: request.city.clone(),
                    state_or_province_code: request.state.clone(),
                    postal_code: request.zip.clone(),
                    country_code: request.country.clone(),
                },
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-Customer-Transaction-Id", transaction_id("address"))
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

fn attr_is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Normalize a raw resolution reply.
///
/// Deliverability (DPV) decides validity; classification only shades the
/// confidence. An empty resolution is an invalid address with suggestions,
/// not an error.
#[must_use]
pub fn normalize(reply: &WireResolveReply, request: &AddressRequest) -> AddressValidationResult {
    let Some(resolved) = reply.output.resolved_addresses.first() else {
        return AddressValidationResult {
            is_valid: false,
            standardized: None,
            confidence: Some(Confidence::High),
            deliverable: Some(false),
            suggestions: vec![
                "Address not found; verify street, city, state, and ZIP".to_string(),
            ],
            is_mock_data: false,
        };
    };

    let deliverable = attr_is_true(resolved.attributes.as_ref().and_then(|a| a.dpv.as_deref()));
    let classification_known = resolved
        .classification
        .as_deref()
        .is_some_and(|c| !c.eq_ignore_ascii_case("UNKNOWN"));

    let confidence = if deliverable && classification_known {
        Confidence::High
    } else if deliverable {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    let standardized = StandardizedAddress {
        street: if resolved.street_lines_token.is_empty() {
            request.street.clone()
        } else {
            resolved.street_lines_token.join(" ")
        },
        city: resolved.city.clone().unwrap_or_else(|| request.city.clone()),
        state: resolved
            .state_or_province_code
            .clone()
            .unwrap_or_else(|| request.state.clone()),
        zip: resolved.postal_code.clone().unwrap_or_else(|| request.zip.clone()),
        country: resolved
            .country_code
            .clone()
            .unwrap_or_else(|| request.country.clone()),
    };

    let suggestions = if deliverable {
        Vec::new()
    } else {
        vec![
            "Verify the street number and name".to_string(),
            "Confirm the ZIP code matches the city and state".to_string(),
        ]
    };

    AddressValidationResult {
        is_valid: deliverable,
        standardized: Some(standardized),
        confidence: Some(confidence),
        deliverable: Some(deliverable),
        suggestions,
        is_mock_data: false,
    }
}
