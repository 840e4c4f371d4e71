//! Synthesized rate quotes.

use chrono::{NaiveDate, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::busday::{add_business_days, format_day};
use crate::core::carrier::Carrier;
use crate::core::models::{RateQuote, RateRequest, RateTier};

use super::seed_from;

/// One synthesized service tier: code, name, price multiplier over the base
/// charge, business days in transit, and commitment time.
struct ServiceTier {
    code: &'static str,
    name: &'static str,
    multiplier: f64,
    business_days: u32,
    delivery_time: &'static str,
}

const EXPRESS_TIERS: &[ServiceTier] = &[
    ServiceTier {
        code: "FIRST_OVERNIGHT",
        name: "First Overnight",
        multiplier: 5.8,
        business_days: 1,
        delivery_time: "by 8:00 AM",
    },
    ServiceTier {
        code: "PRIORITY_OVERNIGHT",
        name: "Priority Overnight",
        multiplier: 3.4,
        business_days: 1,
        delivery_time: "by 10:30 AM",
    },
    ServiceTier {
        code: "STANDARD_OVERNIGHT",
        name: "Standard Overnight",
        multiplier: 3.3,
        business_days: 1,
        delivery_time: "by 5:00 PM",
    },
    ServiceTier {
        code: "EXPRESS_2_DAY_AM",
        name: "2Day AM",
        multiplier: 1.55,
        business_days: 2,
        delivery_time: "by 10:30 AM",
    },
    ServiceTier {
        code: "EXPRESS_2_DAY",
        name: "2Day",
        multiplier: 1.25,
        business_days: 2,
        delivery_time: "by 5:00 PM",
    },
    ServiceTier {
        code: "EXPRESS_SAVER",
        name: "Express Saver",
        multiplier: 1.04,
        business_days: 3,
        delivery_time: "by 5:00 PM",
    },
];

const POSTAL_TIERS: &[ServiceTier] = &[
    ServiceTier {
        code: "PRIORITY_MAIL_EXPRESS",
        name: "Priority Mail Express",
        multiplier: 2.85,
        business_days: 1,
        delivery_time: "by 6:00 PM",
    },
    ServiceTier {
        code: "PRIORITY_MAIL",
        name: "Priority Mail",
        multiplier: 1.2,
        business_days: 2,
        delivery_time: "by 9:00 PM",
    },
    ServiceTier {
        code: "GROUND_ADVANTAGE",
        name: "Ground Advantage",
        multiplier: 0.95,
        business_days: 3,
        delivery_time: "by 9:00 PM",
    },
];

const fn tiers_for(carrier: Carrier) -> &'static [ServiceTier] {
    match carrier {
        Carrier::Express => EXPRESS_TIERS,
        Carrier::Postal => POSTAL_TIERS,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Synthesize a full tier sheet of quotes for a lane and weight.
///
/// The base charge scales with weight plus a small seeded jitter and floors
/// at $25; each tier multiplies it. Prices therefore ascend with speed, and
/// repeating the same request reproduces the same figures.
#[must_use]
pub fn synthesize(carrier: Carrier, request: &RateRequest, today: NaiveDate) -> Vec<RateQuote> {
    let weight_key = format!("{:.1}", request.weight);
    let mut rng = StdRng::seed_from_u64(seed_from(&[
        carrier.cli_name(),
        &request.origin_zip,
        &request.destination_zip,
        &weight_key,
    ]));
    let jitter: f64 = rng.random_range(0.0..5.0);
    let base = (request.weight * 3.5 + jitter).max(25.0);

    tiers_for(carrier)
        .iter()
        .map(|tier| {
            let delivery_date = add_business_days(today, tier.business_days);
            RateQuote {
                carrier: carrier.display_name().to_string(),
                service_name: tier.name.to_string(),
                service_code: tier.code.to_string(),
                total_charge: round_cents(base * tier.multiplier),
                currency: "USD".to_string(),
                transit_time: if tier.business_days == 1 {
                    "1 business day".to_string()
                } else {
                    format!("{} business days", tier.business_days)
                },
                delivery_date: delivery_date
                    .and_hms_opt(17, 0, 0)
                    .map(|dt| Utc.from_utc_datetime(&dt)),
                delivery_day: Some(format_day(delivery_date)),
                delivery_time: Some(tier.delivery_time.to_string()),
                rate_type: Some(RateTier::Account),
                business_days: Some(tier.business_days),
                is_mock_data: true,
            }
        })
        .collect()
}
