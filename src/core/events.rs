//! Fire-and-forget event logging.
//!
//! The core reports operation outcomes (rate requests served, validations
//! run, fallbacks taken) to an [`EventSink`]. Sinks must never block and
//! never fail the operation that emitted the event.

/// A single analytics-style event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub category: &'static str,
    pub action: &'static str,
    pub label: String,
    pub value: Option<i64>,
}

impl Event {
    #[must_use]
    pub fn new(category: &'static str, action: &'static str, label: impl Into<String>) -> Self {
        Self {
            category,
            action,
            label: label.into(),
            value: None,
        }
    }

    #[must_use]
    pub const fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Outbound event sink. Implementations must be infallible and non-blocking.
pub trait EventSink: Send + Sync {
    fn record(&self, event: Event);
}

/// Default sink: structured `tracing` events at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: Event) {
        tracing::info!(
            category = event.category,
            action = event.action,
            label = %event.label,
            value = event.value,
            "event"
        );
    }
}

/// Sink that drops everything. Useful in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: Event) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        events: Mutex<Vec<Event>>,
    }

    impl EventSink for RecordingSink {
        fn record(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn events_carry_label_and_value() {
        let sink = RecordingSink {
            events: Mutex::new(Vec::new()),
        };
        sink.record(Event::new("API", "Rate Request", "Express - Mock").with_value(6));

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, "Express - Mock");
        assert_eq!(events[0].value, Some(6));
    }
}
