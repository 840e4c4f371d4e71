//! Express carrier client.
//!
//! The express carrier exposes JSON POST endpoints under a single base URL
//! and authenticates every call with a bearer token. Requests carry a
//! client-generated transaction id so support can correlate logs.

pub mod address;
pub mod rate;
pub mod track;
pub mod transit;

use chrono::Utc;
use reqwest::Client;

use crate::core::carrier::Carrier;

pub(crate) const CARRIER: Carrier = Carrier::Express;

/// Client for the express carrier's JSON APIs.
///
/// Operation methods live in the per-operation modules; this type only
/// holds the shared connection state.
#[derive(Debug, Clone)]
pub struct ExpressClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl ExpressClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

/// Per-request transaction id sent as `X-Customer-Transaction-Id`.
pub(crate) fn transaction_id(operation: &str) -> String {
    format!("shipnode-{operation}-{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_ids_carry_the_operation() {
        let id = transaction_id("rate");
        assert!(id.starts_with("shipnode-rate-"));
    }
}
