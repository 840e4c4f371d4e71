//! Synthesized tracking histories.

use chrono::{DateTime, Duration, Utc};

use crate::core::carrier::Carrier;
use crate::core::models::{
    EventLocation, TrackRequest, TrackingEvent, TrackingEventType, TrackingResult, TrackingStatus,
};

/// Scenario selected by the tracking number's last digit, so demos can
/// steer the outcome: 0 delivered, 1 exception, anything else in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Delivered,
    Exception,
    InTransit,
}

fn scenario_for(tracking_number: &str) -> Scenario {
    match tracking_number.chars().last() {
        Some('0') => Scenario::Delivered,
        Some('1') => Scenario::Exception,
        _ => Scenario::InTransit,
    }
}

struct Spine {
    offset_hours: i64,
    event_type: TrackingEventType,
    description: &'static str,
    city: &'static str,
    state: &'static str,
}

/// Shared journey: picked up in Indianapolis, routed through the Memphis
/// hub, delivered (or not) in Los Angeles.
const SPINE: &[Spine] = &[
    Spine {
        offset_hours: 72,
        event_type: TrackingEventType::Pickup,
        description: "Picked up",
        city: "Indianapolis",
        state: "IN",
    },
    Spine {
        offset_hours: 68,
        event_type: TrackingEventType::Departure,
        description: "Left origin facility",
        city: "Indianapolis",
        state: "IN",
    },
    Spine {
        offset_hours: 50,
        event_type: TrackingEventType::Arrival,
        description: "Arrived at sort facility",
        city: "Memphis",
        state: "TN",
    },
    Spine {
        offset_hours: 44,
        event_type: TrackingEventType::Departure,
        description: "Departed sort facility",
        city: "Memphis",
        state: "TN",
    },
    Spine {
        offset_hours: 20,
        event_type: TrackingEventType::Arrival,
        description: "Arrived at destination facility",
        city: "Los Angeles",
        state: "CA",
    },
];

fn spine_events(now: DateTime<Utc>) -> Vec<TrackingEvent> {
    SPINE
        .iter()
        .map(|leg| TrackingEvent {
            timestamp: now - Duration::hours(leg.offset_hours),
            event_type: leg.event_type,
            description: leg.description.to_string(),
            location: Some(EventLocation::us(leg.city, leg.state)),
        })
        .collect()
}

/// Synthesize a tracking result for any well-formed tracking number.
#[must_use]
pub fn synthesize(_carrier: Carrier, request: &TrackRequest, now: DateTime<Utc>) -> TrackingResult {
    let mut events = spine_events(now);

    let result = match scenario_for(&request.tracking_number) {
        Scenario::Delivered => {
            events.push(TrackingEvent {
                timestamp: now - Duration::hours(6),
                event_type: TrackingEventType::OnVehicle,
                description: "On vehicle for delivery".to_string(),
                location: Some(EventLocation::us("Los Angeles", "CA")),
            });
            let delivered_at = now - Duration::hours(2);
            events.push(TrackingEvent {
                timestamp: delivered_at,
                event_type: TrackingEventType::Delivery,
                description: "Delivered".to_string(),
                location: Some(EventLocation::us("Los Angeles", "CA")),
            });
            TrackingResult {
                status: TrackingStatus::Delivered,
                status_description: "Delivered".to_string(),
                actual_delivery_date: Some(delivered_at),
                estimated_delivery_date: None,
                delivery_signed_by: Some("J.SMITH".to_string()),
                ..base(request)
            }
        }
        Scenario::Exception => {
            events.push(TrackingEvent {
                timestamp: now - Duration::hours(3),
                event_type: TrackingEventType::Exception,
                description: "Customer not available or business closed".to_string(),
                location: Some(EventLocation::us("Los Angeles", "CA")),
            });
            TrackingResult {
                status: TrackingStatus::Exception,
                status_description: "Delivery exception".to_string(),
                estimated_delivery_date: Some(now + Duration::days(1)),
                ..base(request)
            }
        }
        Scenario::InTransit => TrackingResult {
            status: TrackingStatus::InTransit,
            status_description: "In transit".to_string(),
            estimated_delivery_date: Some(now + Duration::days(1)),
            ..base(request)
        },
    };

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let current_location = events
        .first()
        .and_then(|e| e.location.as_ref())
        .map(EventLocation::short_label);

    TrackingResult {
        events,
        current_location,
        ..result
    }
}

fn base(request: &TrackRequest) -> TrackingResult {
    TrackingResult {
        tracking_number: request.tracking_number.clone(),
        status: TrackingStatus::Unknown,
        status_description: String::new(),
        estimated_delivery_date: None,
        actual_delivery_date: None,
        delivery_signed_by: None,
        current_location: None,
        events: Vec::new(),
        is_mock_data: true,
    }
}
