//! Postal service-standard estimates.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::busday::{add_business_days, business_days_between, format_day};
use crate::core::http::{classify_status, classify_transport_error, parse_json};
use crate::core::models::{TransitOption, TransitRequest, TransitSchedule};
use crate::error::Result;
use crate::providers::parse_timestamp;
use crate::util::format::service_display;

use super::{CARRIER, PostalClient};

// =============================================================================
// Wire Schemas
// =============================================================================

/// The estimates endpoint returns a bare JSON array, one entry per mail
/// class on the lane.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireServiceStandard {
    #[serde(default)]
    pub mail_class: String,

    /// Days, as a string ("2").
    #[serde(default)]
    pub service_standard: Option<String>,

    #[serde(default)]
    pub service_standard_message: Option<String>,

    #[serde(default)]
    pub scheduled_delivery_date_time: Option<String>,
}

// =============================================================================
// Fetch
// =============================================================================

impl PostalClient {
    /// Fetch service standards for a lane and acceptance date.
    pub async fn fetch_transit(
        &self,
        token: &str,
        request: &TransitRequest,
        ship_date: NaiveDate,
    ) -> Result<Vec<WireServiceStandard>> {
        let url = format!("{}/service-standards/v3/estimates", self.base_url);
        let acceptance = ship_date.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("originZIPCode", request.origin_zip.as_str()),
                ("destinationZIPCode", request.destination_zip.as_str()),
                ("mailClass", "ALL"),
                ("acceptanceDate", acceptance.as_str()),
            ])
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

/// Normalize service-standard estimates into a schedule.
///
/// The delivery date comes from the scheduled timestamp when present,
/// otherwise it is derived from the standard's day count. Entries with
/// neither are excluded and noted.
#[must_use]
pub fn normalize(
    standards: &[WireServiceStandard],
    request: &TransitRequest,
    ship_date: NaiveDate,
) -> TransitSchedule {
    let mut services = Vec::new();
    let mut notes = Vec::new();

    for standard in standards {
        let days = standard
            .service_standard
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|d| *d >= 1);
        let scheduled = standard
            .scheduled_delivery_date_time
            .as_deref()
            .and_then(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()))
            });

        let (delivery_date, business_days) = match (scheduled, days) {
            (Some(date), Some(days)) => (date, days),
            (Some(date), None) => {
                let derived = business_days_between(ship_date, date).max(1);
                (date, derived)
            }
            (None, Some(days)) => (add_business_days(ship_date, days), days),
            (None, None) => {
                notes.push(format!(
                    "{}: no service standard published for this lane",
                    service_display(&standard.mail_class)
                ));
                continue;
            }
        };

        let mut option_notes = Vec::new();
        if let Some(message) = standard.service_standard_message.clone() {
            option_notes.push(message);
        }

        services.push(TransitOption {
            service_code: standard.mail_class.clone(),
            service_name: service_display(&standard.mail_class),
            delivery_date,
            delivery_day: format_day(delivery_date),
            delivery_time: None,
            business_days,
            available: true,
            cutoff_time: None,
            notes: option_notes,
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

    fn standards(value: serde_json::Value) -> Vec<WireServiceStandard> {
        serde_json::from_value(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn prefers_scheduled_date_over_derived() {
        let standards = standards(json!([
            {
                "mailClass": "PRIORITY_MAIL_EXPRESS",
                "serviceStandard": "1",
                "scheduledDeliveryDateTime": "2026-03-06T18:00:00"
            },
            {
                "mailClass": "GROUND_ADVANTAGE",
                "serviceStandard": "4",
                "serviceStandardMessage": "4 Days"
            }
        ]));

        // Ships Thursday Mar 5
        let schedule = normalize(
            &standards,
            &TransitRequest::new("46201", "90001"),
            date(2026, 3, 5),
        );
        assert_eq!(schedule.services.len(), 2);
        assert_eq!(schedule.services[0].service_code, "PRIORITY_MAIL_EXPRESS");
        assert_eq!(schedule.services[0].delivery_date, date(2026, 3, 6));
        // 4 business days from Thursday crosses the weekend
        assert_eq!(schedule.services[1].delivery_date, date(2026, 3, 11));
        assert_eq!(schedule.services[1].notes, vec!["4 Days".to_string()]);
    }

    #[test]
    fn entries_without_standard_or_schedule_become_notes() {
        let standards = standards(json!([
            { "mailClass": "MEDIA_MAIL" }
        ]));
        let schedule = normalize(
            &standards,
            &TransitRequest::new("46201", "99501"),
            date(2026, 3, 5),
        );
        assert!(schedule.services.is_empty());
        assert_eq!(schedule.notes.len(), 1);
        assert!(schedule.notes[0].starts_with("Media Mail"));
    }

    #[test]
    fn sorts_fastest_first() {
        let standards = standards(json!([
            { "mailClass": "GROUND_ADVANTAGE", "serviceStandard": "5" },
            { "mailClass": "PRIORITY_MAIL", "serviceStandard": "2" }
        ]));
        let schedule = normalize(
            &standards,
            &TransitRequest::new("46201", "60601"),
            date(2026, 3, 2),
        );
        assert_eq!(schedule.services[0].service_code, "PRIORITY_MAIL");
    }
}
