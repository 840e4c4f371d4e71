//! Postal carrier client.
//!
//! The postal carrier splits its API across small versioned services under
//! one base URL. Lookups (address, tracking, service standards) are GET
//! requests with query parameters; pricing is a JSON POST. All calls carry
//! a bearer token.

pub mod address;
pub mod rate;
pub mod track;
pub mod transit;

use reqwest::Client;

use crate::core::carrier::Carrier;

pub(crate) const CARRIER: Carrier = Carrier::Postal;

/// Client for the postal carrier's APIs.
#[derive(Debug, Clone)]
pub struct PostalClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl PostalClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}
