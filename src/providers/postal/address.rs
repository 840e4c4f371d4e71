//! Postal address lookup.

use serde::Deserialize;

use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::core::models::{AddressRequest, AddressValidationResult, Confidence, StandardizedAddress};
use crate::error::Result;

use super::{CARRIER, PostalClient};

// =============================================================================
// Wire Schemas
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAddressReply {
    #[serde(default)]
    pub address: Option<WireAddress>,

    #[serde(default)]
    pub additional_info: Option<WireAdditionalInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAddress {
    #[serde(default)]
    pub street_address: Option<String>,

    #[serde(default)]
    pub secondary_address: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(rename = "ZIPCode", default)]
    pub zip_code: Option<String>,

    #[serde(rename = "ZIPPlus4", default)]
    pub zip_plus4: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAdditionalInfo {
    /// Delivery-point confirmation: "Y" confirmed, "D"/"S" missing or
    /// unconfirmed secondary, "N" not deliverable.
    #[serde(rename = "DPVConfirmation", default)]
    pub dpv_confirmation: Option<String>,

    #[serde(default)]
    pub vacant: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

impl PostalClient {
    /// Look up an address. `Ok(None)` means the carrier has no match, which
    /// is a valid not-found answer rather than a failure.
    pub async fn fetch_address(
        &self,
        token: &str,
        request: &AddressRequest,
    ) -> Result<Option<WireAddressReply>> {
        let url = format!("{}/addresses/v3/address", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("streetAddress", request.street.as_str()),
                ("city", request.city.as_str()),
                ("state", request.state.as_str()),
                ("ZIPCode", request.zip.as_str()),
            ])
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

/// Result for a lookup the carrier could not match at all.
#[must_use]
pub fn normalize_not_found() -> AddressValidationResult {
    AddressValidationResult {
        is_valid: false,
        standardized: None,
        confidence: Some(Confidence::High),
        deliverable: Some(false),
        suggestions: vec!["Address not found; verify street, city, state, and ZIP".to_string()],
        is_mock_data: false,
    }
}

/// Normalize a raw address reply.
///
/// Delivery-point confirmation drives the outcome: "Y" is a confirmed
/// delivery point, "D"/"S" means the building matched but the unit did not,
/// anything else is undeliverable.
#[must_use]
pub fn normalize(reply: &WireAddressReply, request: &AddressRequest) -> AddressValidationResult {
    let Some(address) = reply.address.as_ref() else {
        return normalize_not_found();
    };

    let dpv = reply
        .additional_info
        .as_ref()
        .and_then(|info| info.dpv_confirmation.as_deref())
        .unwrap_or_default()
        .to_uppercase();

    let (is_valid, confidence, mut suggestions) = match dpv.as_str() {
        "Y" => (true, Confidence::High, Vec::new()),
        "D" | "S" => (
            true,
            Confidence::Medium,
            vec!["Add or correct the apartment or suite number".to_string()],
        ),
        _ => (
            false,
            Confidence::Low,
            vec![
                "Verify the street number and name".to_string(),
                "Confirm the ZIP code matches the city and state".to_string(),
            ],
        ),
    };

    if reply
        .additional_info
        .as_ref()
        .and_then(|info| info.vacant.as_deref())
        .is_some_and(|v| v.eq_ignore_ascii_case("Y"))
    {
        suggestions.push("Carrier reports this delivery point as vacant".to_string());
    }

    let zip = match (address.zip_code.as_deref(), address.zip_plus4.as_deref()) {
        (Some(zip), Some(plus4)) if !plus4.is_empty() => format!("{zip}-{plus4}"),
        (Some(zip), _) => zip.to_string(),
        (None, _) => request.zip.clone(),
    };

    let street = match (address.street_address.as_deref(), address.secondary_address.as_deref()) {
        (Some(street), Some(unit)) if !unit.is_empty() => format!("{street} {unit}"),
        (Some(street), _) => street.to_string(),
        (None, _) => request.street.clone(),
    };

    AddressValidationResult {
        is_valid,
        standardized: Some(StandardizedAddress {
            street,
            city: address.city.clone().unwrap_or_else(|| request.city.clone()),
            state: address.state.clone().unwrap_or_else(|| request.state.clone()),
            zip,
            country: request.country.clone(),
        }),
        confidence: Some(confidence),
        deliverable: Some(is_valid),
        suggestions,
        is_mock_data: false,
    }
}
