//! Integration tests for the carrier clients against a mock server.
//!
//! Verifies status-code classification (401, 429, 5xx), not-found handling,
//! timeout mapping, and the credential-exchange flow through the token cache.

use std::time::Duration;

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shipnode::core::carrier::Carrier;
use shipnode::core::config::{ApiEnvironment, Credential};
use shipnode::core::http::build_client;
use shipnode::core::models::{AddressRequest, RateRequest, TrackRequest};
use shipnode::core::token::{HttpTokenExchanger, TokenCache};
use shipnode::error::ShipError;
use shipnode::providers::express::ExpressClient;
use shipnode::providers::postal::PostalClient;

fn express_client(server: &MockServer) -> ExpressClient {
    ExpressClient::new(build_client(Duration::from_secs(5)).unwrap(), server.uri())
}

fn postal_client(server: &MockServer) -> PostalClient {
    PostalClient::new(build_client(Duration::from_secs(5)).unwrap(), server.uri())
}

// =============================================================================
// Express
// =============================================================================

#[tokio::test]
async fn express_rates_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rate/v1/rates/quotes"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "output": {
                "rateReplyDetails": [{
                    "serviceType": "EXPRESS_SAVER",
                    "ratedShipmentDetails": [
                        { "rateType": "ACCOUNT", "totalNetCharge": 31.42, "currency": "USD" }
                    ]
                }]
            }
        })))
        .mount(&server)
        .await;

    let client = express_client(&server);
    let reply = client
        .fetch_rates("test-token", &RateRequest::new("46201", "90001", 5.0))
        .await
        .expect("rates should fetch");

    let quotes = shipnode::providers::express::rate::normalize(&reply);
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].total_charge, 31.42);
}

#[tokio::test]
async fn unauthorized_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rate/v1/rates/quotes"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let client = express_client(&server);
    let err = client
        .fetch_rates("stale", &RateRequest::new("46201", "90001", 5.0))
        .await
        .unwrap_err();

    assert!(matches!(err, ShipError::AuthFailed { .. }));
    assert!(!err.triggers_fallback());
}

#[tokio::test]
async fn rate_limited_is_retryable_but_no_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/track/v1/trackingnumbers"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = express_client(&server);
    let err = client
        .fetch_tracking("token", &TrackRequest::new("794658201330"))
        .await
        .unwrap_err();

    assert!(matches!(err, ShipError::RateLimited { .. }));
    assert!(err.is_retryable());
    assert!(!err.triggers_fallback());
}

#[tokio::test]
async fn server_error_triggers_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rate/v1/rates/quotes"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = express_client(&server);
    let err = client
        .fetch_rates("token", &RateRequest::new("46201", "90001", 5.0))
        .await
        .unwrap_err();

    assert!(matches!(err, ShipError::ProviderUnavailable { .. }));
    assert!(err.triggers_fallback());
}

#[tokio::test]
async fn multibyte_error_body_is_truncated_without_panic() {
    let server = MockServer::start().await;
    // Two-byte chars straddle the snippet limit
    let body = format!("a{}", "é".repeat(150));
    Mock::given(method("POST"))
        .and(path("/rate/v1/rates/quotes"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let client = express_client(&server);
    let err = client
        .fetch_rates("token", &RateRequest::new("46201", "90001", 5.0))
        .await
        .unwrap_err();

    match err {
        ShipError::ProviderUnavailable { message, .. } => {
            assert!(message.len() <= 200);
            assert!(message.starts_with('a'));
        }
        other => panic!("expected ProviderUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn tracking_not_found_is_none_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/track/v1/trackingnumbers"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = express_client(&server);
    let reply = client
        .fetch_tracking("token", &TrackRequest::new("999999999999"))
        .await
        .expect("404 is a valid answer");
    assert!(reply.is_none());
}

#[tokio::test]
async fn slow_server_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rate/v1/rates/quotes"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = ExpressClient::new(
        build_client(Duration::from_millis(200)).unwrap(),
        server.uri(),
    );
    let err = client
        .fetch_rates("token", &RateRequest::new("46201", "90001", 5.0))
        .await
        .unwrap_err();

    match &err {
        ShipError::Timeout { seconds, .. } => {
            // The reported budget is the carrier's configured timeout
            assert_eq!(*seconds, Carrier::Express.default_timeout().as_secs());
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert!(err.triggers_fallback());
}

// =============================================================================
// Postal
// =============================================================================

#[tokio::test]
async fn postal_address_lookup_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/addresses/v3/address"))
        .and(query_param("ZIPCode", "20500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": {
                "streetAddress": "1600 PENNSYLVANIA AVE NW",
                "city": "WASHINGTON",
                "state": "DC",
                "ZIPCode": "20500"
            },
            "additionalInfo": { "DPVConfirmation": "Y" }
        })))
        .mount(&server)
        .await;

    let client = postal_client(&server);
    let request = AddressRequest::new("1600 pennsylvania ave nw", "washington", "DC", "20500");
    let reply = client
        .fetch_address("token", &request)
        .await
        .expect("lookup should succeed")
        .expect("address should match");

    let result = shipnode::providers::postal::address::normalize(&reply, &request);
    assert!(result.is_valid);
}

#[tokio::test]
async fn postal_address_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/addresses/v3/address"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = postal_client(&server);
    let reply = client
        .fetch_address(
            "token",
            &AddressRequest::new("1 nonexistent way", "nowhereville", "OH", "44101"),
        )
        .await
        .expect("404 is a valid answer");
    assert!(reply.is_none());
}

// =============================================================================
// Credential Exchange
// =============================================================================

fn credential_for(server: &MockServer, carrier: Carrier) -> Credential {
    Credential {
        carrier,
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        base_url: server.uri(),
        environment: ApiEnvironment::Sandbox,
    }
}

#[tokio::test]
async fn express_token_exchange_uses_form_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=client-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "express-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TokenCache::new(
        Carrier::Express,
        HttpTokenExchanger::new(build_client(Duration::from_secs(5)).unwrap()),
    );
    let credential = credential_for(&server, Carrier::Express);

    // Second call must reuse the cached token (expect(1) above enforces it)
    let first = cache.get_token(&credential).await.unwrap();
    let second = cache.get_token(&credential).await.unwrap();
    assert_eq!(first, "express-token");
    assert_eq!(first, second);
}

#[tokio::test]
async fn postal_token_exchange_uses_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/v3/token"))
        .and(body_string_contains("client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "postal-token"
        })))
        .mount(&server)
        .await;

    let cache = TokenCache::new(
        Carrier::Postal,
        HttpTokenExchanger::new(build_client(Duration::from_secs(5)).unwrap()),
    );
    let token = cache
        .get_token(&credential_for(&server, Carrier::Postal))
        .await
        .unwrap();
    assert_eq!(token, "postal-token");
}

#[tokio::test]
async fn rejected_exchange_is_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let cache = TokenCache::new(
        Carrier::Express,
        HttpTokenExchanger::new(build_client(Duration::from_secs(5)).unwrap()),
    );
    let err = cache
        .get_token(&credential_for(&server, Carrier::Express))
        .await
        .unwrap_err();
    assert!(matches!(err, ShipError::AuthFailed { .. }));
}
