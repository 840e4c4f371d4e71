//! Result selection and ordering.
//!
//! Pure functions over normalized results: cheapest-first rate sorting,
//! fastest-first transit sorting, and urgency classification. Empty input
//! yields empty output; there are no error conditions here.

use crate::core::models::{RateQuote, TransitOption};

/// Delivery urgency derived from business-day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    Express,
    Standard,
}

impl Urgency {
    /// 1 business day → urgent, 2 → express, everything else → standard.
    #[must_use]
    pub const fn from_business_days(days: u32) -> Self {
        match days {
            1 => Self::Urgent,
            2 => Self::Express,
            _ => Self::Standard,
        }
    }
}

/// Sort quotes ascending by total charge; ties break toward fewer business
/// days so the faster service lists first at equal price.
pub fn sort_rates(rates: &mut [RateQuote]) {
    rates.sort_by(|a, b| {
        a.total_charge
            .total_cmp(&b.total_charge)
            .then_with(|| {
                a.business_days
                    .unwrap_or(u32::MAX)
                    .cmp(&b.business_days.unwrap_or(u32::MAX))
            })
    });
}

/// Sort transit options ascending by business-day count.
pub fn sort_transit(options: &mut [TransitOption]) {
    options.sort_by_key(|o| o.business_days);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(code: &str, charge: f64, days: u32) -> RateQuote {
        RateQuote {
            carrier: "Express".to_string(),
            service_name: code.to_string(),
            service_code: code.to_string(),
            total_charge: charge,
            currency: "USD".to_string(),
            transit_time: format!("{days} business days"),
            delivery_date: None,
            delivery_day: None,
            delivery_time: None,
            rate_type: None,
            business_days: Some(days),
            is_mock_data: true,
        }
    }

    #[test]
    fn rates_sort_cheapest_first() {
        let mut rates = vec![
            quote("OVERNIGHT", 98.50, 1),
            quote("SAVER", 31.10, 3),
            quote("TWO_DAY", 40.25, 2),
        ];
        sort_rates(&mut rates);
        let codes: Vec<&str> = rates.iter().map(|r| r.service_code.as_str()).collect();
        assert_eq!(codes, vec!["SAVER", "TWO_DAY", "OVERNIGHT"]);
    }

    #[test]
    fn equal_price_prefers_faster_service() {
        let mut rates = vec![quote("SLOW", 40.0, 3), quote("FAST", 40.0, 2)];
        sort_rates(&mut rates);
        assert_eq!(rates[0].service_code, "FAST");
    }

    #[test]
    fn empty_input_is_fine() {
        let mut rates: Vec<RateQuote> = Vec::new();
        sort_rates(&mut rates);
        assert!(rates.is_empty());
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(Urgency::from_business_days(1), Urgency::Urgent);
        assert_eq!(Urgency::from_business_days(2), Urgency::Express);
        assert_eq!(Urgency::from_business_days(3), Urgency::Standard);
        assert_eq!(Urgency::from_business_days(7), Urgency::Standard);
    }
}
