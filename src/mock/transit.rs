//! Synthesized transit schedules.

use chrono::NaiveDate;

use crate::core::busday::{add_business_days, format_day, is_business_day};
use crate::core::carrier::Carrier;
use crate::core::models::{TransitOption, TransitRequest, TransitSchedule};

struct TransitTier {
    code: &'static str,
    name: &'static str,
    business_days: u32,
    delivery_time: &'static str,
    cutoff_time: &'static str,
}

const EXPRESS_TIERS: &[TransitTier] = &[
    TransitTier {
        code: "FIRST_OVERNIGHT",
        name: "First Overnight",
        business_days: 1,
        delivery_time: "by 8:00 AM",
        cutoff_time: "17:00",
    },
    TransitTier {
        code: "PRIORITY_OVERNIGHT",
        name: "Priority Overnight",
        business_days: 1,
        delivery_time: "by 10:30 AM",
        cutoff_time: "17:00",
    },
    TransitTier {
        code: "STANDARD_OVERNIGHT",
        name: "Standard Overnight",
        business_days: 1,
        delivery_time: "by 5:00 PM",
        cutoff_time: "17:00",
    },
    TransitTier {
        code: "EXPRESS_2_DAY_AM",
        name: "2Day AM",
        business_days: 2,
        delivery_time: "by 10:30 AM",
        cutoff_time: "18:00",
    },
    TransitTier {
        code: "EXPRESS_2_DAY",
        name: "2Day",
        business_days: 2,
        delivery_time: "by 5:00 PM",
        cutoff_time: "18:00",
    },
    TransitTier {
        code: "EXPRESS_SAVER",
        name: "Express Saver",
        business_days: 3,
        delivery_time: "by 5:00 PM",
        cutoff_time: "18:00",
    },
];

const POSTAL_TIERS: &[TransitTier] = &[
    TransitTier {
        code: "PRIORITY_MAIL_EXPRESS",
        name: "Priority Mail Express",
        business_days: 1,
        delivery_time: "by 6:00 PM",
        cutoff_time: "17:00",
    },
    TransitTier {
        code: "PRIORITY_MAIL",
        name: "Priority Mail",
        business_days: 2,
        delivery_time: "by 9:00 PM",
        cutoff_time: "17:00",
    },
    TransitTier {
        code: "GROUND_ADVANTAGE",
        name: "Ground Advantage",
        business_days: 3,
        delivery_time: "by 9:00 PM",
        cutoff_time: "17:00",
    },
];

const fn tiers_for(carrier: Carrier) -> &'static [TransitTier] {
    match carrier {
        Carrier::Express => EXPRESS_TIERS,
        Carrier::Postal => POSTAL_TIERS,
    }
}

/// Rough lane distance from the leading ZIP digits (national prefix zones).
fn lane_zone(origin: &str, destination: &str) -> u32 {
    let digit = |zip: &str| {
        zip.chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0)
    };
    digit(origin).abs_diff(digit(destination))
}

/// Synthesize a transit schedule for a lane.
///
/// Long lanes (leading-digit zones far apart) add a day to multi-day
/// services and drop the earliest-morning overnight tier, mirroring how
/// carriers restrict premium commitments by distance. Weekend ship dates
/// roll forward to the next business day.
#[must_use]
pub fn synthesize(carrier: Carrier, request: &TransitRequest, ship_date: NaiveDate) -> TransitSchedule {
    let mut notes = Vec::new();

    let effective_ship_date = if is_business_day(ship_date) {
        ship_date
    } else {
        let next = add_business_days(ship_date, 1);
        notes.push(format!(
            "Ship date falls on a weekend; using next business day {}",
            format_day(next)
        ));
        next
    };

    let zone = lane_zone(&request.origin_zip, &request.destination_zip);
    let mut services = Vec::new();

    for tier in tiers_for(carrier) {
        if zone >= 6 && tier.code == "FIRST_OVERNIGHT" {
            notes.push(format!("{}: not available for this lane", tier.name));
            continue;
        }

        let extra = u32::from(zone >= 5 && tier.business_days >= 2);
        let business_days = tier.business_days + extra;
        let delivery_date = add_business_days(effective_ship_date, business_days);

        services.push(TransitOption {
            service_code: tier.code.to_string(),
            service_name: tier.name.to_string(),
            delivery_date,
            delivery_day: format_day(delivery_date),
            delivery_time: Some(tier.delivery_time.to_string()),
            business_days,
            available: true,
            cutoff_time: Some(tier.cutoff_time.to_string()),
            notes: Vec::new(),
        });
    }

    services.sort_by_key(|s| s.business_days);

    TransitSchedule {
        origin: request.origin_zip.clone(),
        destination: request.destination_zip.clone(),
        ship_date: effective_ship_date,
        services,
        notes,
        is_mock_data: true,
    }
}
