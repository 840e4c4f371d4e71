//! Bearer-token acquisition and caching.
//!
//! Each carrier gets one [`TokenCache`]: the only shared mutable state in the
//! process. Guarantees:
//!
//! - a token is never handed out within the safety margin of its expiry;
//! - concurrent callers racing on an expired token collapse into a single
//!   credential exchange (single-flight) and share its result;
//! - reads of a still-fresh token never wait on an in-flight refresh.
//!
//! The clock and the exchange call are injectable so tests can drive expiry
//! and count exchanges without a network.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

use crate::core::carrier::Carrier;
use crate::core::config::Credential;
use crate::core::http;
use crate::error::{Result, ShipError};

/// Buffer subtracted from a token's reported lifetime to force early refresh.
pub const SAFETY_MARGIN_SECS: i64 = 300;

/// Time source, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A granted bearer credential with its reported lifetime.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in_secs: i64,
}

/// The credential-exchange call, injectable for tests.
pub trait TokenExchanger: Send + Sync {
    fn exchange(
        &self,
        credential: &Credential,
    ) -> impl std::future::Future<Output = Result<TokenGrant>> + Send;
}

/// Cached bearer token. Mutated only by the cache; replaced on refresh.
#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        now + margin < self.expires_at
    }
}

/// Per-carrier token cache with lazy, single-flight refresh.
pub struct TokenCache<X, C = SystemClock> {
    carrier: Carrier,
    exchanger: X,
    clock: C,
    margin: Duration,
    state: RwLock<Option<CachedToken>>,
    refresh: Mutex<()>,
}

impl<X: TokenExchanger> TokenCache<X> {
    /// Cache with the wall clock and the default safety margin.
    pub fn new(carrier: Carrier, exchanger: X) -> Self {
        Self::with_clock(carrier, exchanger, SystemClock)
    }
}

impl<X: TokenExchanger, C: Clock> TokenCache<X, C> {
    pub fn with_clock(carrier: Carrier, exchanger: X, clock: C) -> Self {
        Self {
            carrier,
            exchanger,
            clock,
            margin: Duration::seconds(SAFETY_MARGIN_SECS),
            state: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Override the safety margin (tests).
    #[must_use]
    pub fn with_margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    /// Return a fresh bearer token, exchanging credentials if needed.
    ///
    /// # Errors
    ///
    /// Propagates the exchanger's typed error when the exchange is rejected
    /// or unreachable. No automatic retries; retry policy belongs to the
    /// caller.
    pub async fn get_token(&self, credential: &Credential) -> Result<String> {
        // Fast path: fresh token under a read lock only.
        if let Some(token) = self.state.read().await.as_ref() {
            if token.is_fresh(self.clock.now(), self.margin) {
                return Ok(token.value.clone());
            }
        }

        // Slow path: serialize refreshes. Late arrivals re-check and reuse
        // the winner's token instead of issuing their own exchange.
        let _guard = self.refresh.lock().await;
        if let Some(token) = self.state.read().await.as_ref() {
            if token.is_fresh(self.clock.now(), self.margin) {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!(carrier = self.carrier.cli_name(), "exchanging credentials");
        let grant = self.exchanger.exchange(credential).await?;
        let now = self.clock.now();
        let token = CachedToken {
            value: grant.access_token,
            expires_at: now + Duration::seconds(grant.expires_in_secs),
        };
        let value = token.value.clone();
        *self.state.write().await = Some(token);
        Ok(value)
    }

    /// Drop any cached token, forcing the next call to exchange.
    pub async fn invalidate(&self) {
        *self.state.write().await = None;
    }
}

// =============================================================================
// HTTP Exchanger
// =============================================================================

/// Wire shape of a carrier OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenWireResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

const fn default_expires_in() -> i64 {
    3600
}

/// Real credential exchange over HTTP.
///
/// Both carriers use the client-credentials grant, but their token endpoints
/// differ: the express carrier takes a form-encoded POST, the postal gateway
/// a JSON body on a versioned path.
#[derive(Debug, Clone)]
pub struct HttpTokenExchanger {
    client: reqwest::Client,
}

impl HttpTokenExchanger {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl TokenExchanger for HttpTokenExchanger {
    async fn exchange(&self, credential: &Credential) -> Result<TokenGrant> {
        let carrier = credential.carrier;
        let request = match carrier {
            Carrier::Express => self
                .client
                .post(format!("{}/oauth/token", credential.base_url))
                .form(&[
                    ("grant_type", "client_credentials"),
                    ("client_id", credential.client_id.as_str()),
                    ("client_secret", credential.client_secret.as_str()),
                ]),
            Carrier::Postal => self
                .client
                .post(format!("{}/oauth2/v3/token", credential.base_url))
                .json(&serde_json::json!({
                    "client_id": credential.client_id,
                    "client_secret": credential.client_secret,
                    "grant_type": "client_credentials",
                })),
        };

        let response = request
            .send()
            .await
            .map_err(|e| http::classify_transport_error(carrier, &e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShipError::AuthFailed {
                carrier: carrier.cli_name().to_string(),
                message: format!("credential exchange returned HTTP {status}: {body}"),
            });
        }

        let wire: TokenWireResponse = http::parse_json(carrier, response).await?;
        Ok(TokenGrant {
            access_token: wire.access_token,
            expires_in_secs: wire.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiEnvironment;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    fn credential() -> Credential {
        Credential {
            carrier: Carrier::Express,
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            base_url: "http://unused".to_string(),
            environment: ApiEnvironment::Sandbox,
        }
    }

    /// Clock pinned to an adjustable offset from a fixed epoch.
    struct FakeClock {
        offset_secs: Arc<AtomicI64>,
    }

    impl FakeClock {
        fn pair() -> (Self, Arc<AtomicI64>) {
            let offset = Arc::new(AtomicI64::new(0));
            (
                Self {
                    offset_secs: Arc::clone(&offset),
                },
                offset,
            )
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp(1_767_225_600, 0).unwrap()
                + Duration::seconds(self.offset_secs.load(Ordering::SeqCst))
        }
    }

    /// Exchanger that counts calls and hands out numbered tokens.
    #[derive(Clone)]
    struct CountingExchanger {
        calls: Arc<AtomicUsize>,
        expires_in_secs: i64,
    }

    impl CountingExchanger {
        fn new(expires_in_secs: i64) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                expires_in_secs,
            }
        }
    }

    impl TokenExchanger for CountingExchanger {
        async fn exchange(&self, _credential: &Credential) -> Result<TokenGrant> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(TokenGrant {
                access_token: format!("token-{n}"),
                expires_in_secs: self.expires_in_secs,
            })
        }
    }

    #[tokio::test]
    async fn fresh_token_is_reused_without_exchange() {
        let exchanger = CountingExchanger::new(3600);
        let calls = Arc::clone(&exchanger.calls);
        let cache = TokenCache::new(Carrier::Express, exchanger);

        let first = cache.get_token(&credential()).await.unwrap();
        let second = cache.get_token(&credential()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn token_inside_safety_margin_triggers_refresh() {
        // Expires 4 minutes out; the 5-minute margin makes it stale on read.
        let (clock, _offset) = FakeClock::pair();
        let exchanger = CountingExchanger::new(240);
        let calls = Arc::clone(&exchanger.calls);
        let cache = TokenCache::with_clock(Carrier::Express, exchanger, clock);

        let first = cache.get_token(&credential()).await.unwrap();
        let second = cache.get_token(&credential()).await.unwrap();

        assert_eq!(first, "token-1");
        assert_eq!(second, "token-2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_token_is_replaced_after_time_passes() {
        let (clock, offset) = FakeClock::pair();
        let exchanger = CountingExchanger::new(3600);
        let calls = Arc::clone(&exchanger.calls);
        let cache = TokenCache::with_clock(Carrier::Express, exchanger, clock);

        let first = cache.get_token(&credential()).await.unwrap();
        // Jump past expiry minus margin
        offset.store(3301, Ordering::SeqCst);
        let second = cache.get_token(&credential()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_exchange() {
        let exchanger = CountingExchanger::new(3600);
        let calls = Arc::clone(&exchanger.calls);
        let cache = Arc::new(TokenCache::new(Carrier::Express, exchanger));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.get_token(&credential()).await.unwrap()
            }));
        }

        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(tokens.iter().all(|t| t == "token-1"));
    }

    #[tokio::test]
    async fn invalidate_forces_new_exchange() {
        let exchanger = CountingExchanger::new(3600);
        let calls = Arc::clone(&exchanger.calls);
        let cache = TokenCache::new(Carrier::Express, exchanger);

        cache.get_token(&credential()).await.unwrap();
        cache.invalidate().await;
        cache.get_token(&credential()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
