//! HTTP client utilities.
//!
//! Builds the per-carrier HTTP clients and classifies transport/status
//! failures into the typed error set. Carrier calls are the only suspension
//! points in the core; every one of them is bounded by the client timeout.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response, StatusCode};

use crate::core::carrier::Carrier;
use crate::error::{Result, ShipError};

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(format!("shipnode/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ShipError::Network {
            carrier: "client".to_string(),
            message: e.to_string(),
        })
}

/// Map a reqwest transport error to the typed taxonomy.
#[must_use]
pub fn classify_transport_error(carrier: Carrier, err: &reqwest::Error) -> ShipError {
    if err.is_timeout() {
        ShipError::Timeout {
            carrier: carrier.cli_name().to_string(),
            seconds: carrier.default_timeout().as_secs(),
        }
    } else {
        ShipError::Network {
            carrier: carrier.cli_name().to_string(),
            message: err.to_string(),
        }
    }
}

/// Map a non-2xx carrier response to the typed taxonomy.
///
/// `404` is deliberately NOT handled here: whether a missing record is an
/// error depends on the operation, so clients branch on it before calling
/// this. Everything else follows one classification:
/// 401/403 → auth, 429 → rate limited, 5xx → unavailable, rest → API error.
pub async fn classify_status(carrier: Carrier, response: Response) -> ShipError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = if body.is_empty() {
        format!("HTTP {status}")
    } else {
        truncate_snippet(body, 200)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ShipError::AuthFailed {
            carrier: carrier.cli_name().to_string(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => ShipError::RateLimited {
            carrier: carrier.cli_name().to_string(),
            retry_after: None,
        },
        s if s.is_server_error() => ShipError::ProviderUnavailable {
            carrier: carrier.cli_name().to_string(),
            message,
        },
        _ => ShipError::ProviderApiError {
            carrier: carrier.cli_name().to_string(),
            status_code: Some(status.as_u16()),
            message,
        },
    }
}

/// Bound an error body for the message. Bodies can be large HTML error
/// pages, and the cut must land on a char boundary.
fn truncate_snippet(mut body: String, max_bytes: usize) -> String {
    let mut end = body.len().min(max_bytes);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body
}

/// Parse a 2xx carrier response body as JSON.
pub async fn parse_json<T: serde::de::DeserializeOwned>(
    carrier: Carrier,
    response: Response,
) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ShipError::ParseResponse {
            carrier: carrier.cli_name().to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_cut_lands_on_char_boundary() {
        // 'a' then two-byte chars: byte 200 falls inside a char
        let body = format!("a{}", "é".repeat(150));
        let snippet = truncate_snippet(body, 200);
        assert_eq!(snippet.len(), 199);
        assert!(snippet.starts_with('a'));
        assert!(snippet.ends_with('é'));
    }

    #[test]
    fn short_snippet_is_untouched() {
        assert_eq!(truncate_snippet("maintenance".to_string(), 200), "maintenance");
    }
}
