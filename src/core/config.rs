//! Credential resolution.
//!
//! Credentials are read from the environment once at startup and held
//! immutably for the process lifetime. A missing credential is an expected
//! state (`CredentialState::NotConfigured`), not an error; it is what
//! routes a request into mock mode.

use crate::core::carrier::Carrier;

/// Sandbox vs. live carrier environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    #[default]
    Sandbox,
    Live,
}

/// Immutable credential for one carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub carrier: Carrier,
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
    pub environment: ApiEnvironment,
}

/// Outcome of credential resolution for one carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialState {
    /// Both client id and secret are present.
    Configured(Credential),
    /// One or both credential parts are absent.
    NotConfigured,
}

impl CredentialState {
    /// Returns the credential if configured.
    #[must_use]
    pub const fn as_credential(&self) -> Option<&Credential> {
        match self {
            Self::Configured(cred) => Some(cred),
            Self::NotConfigured => None,
        }
    }

    /// Whether live calls are possible for this carrier.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

/// Resolved configuration for the whole process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    express: CredentialState,
    postal: CredentialState,
    /// Global switch forcing synthesized data even when credentials exist.
    pub force_mock: bool,
}

/// Environment variable forcing mock mode for all carriers.
const FORCE_MOCK_ENV: &str = "SHIPNODE_FORCE_MOCK";

impl AppConfig {
    /// Resolve configuration from process environment variables.
    ///
    /// Reads `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET`, and optional
    /// `{PREFIX}_API_URL` per carrier, plus the global force-mock switch.
    /// Never fails: absence of any variable yields `NotConfigured`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            express: resolve_carrier(Carrier::Express),
            postal: resolve_carrier(Carrier::Postal),
            force_mock: env_flag(FORCE_MOCK_ENV),
        }
    }

    /// Build a config directly, for tests and embedding.
    #[must_use]
    pub const fn new(
        express: CredentialState,
        postal: CredentialState,
        force_mock: bool,
    ) -> Self {
        Self {
            express,
            postal,
            force_mock,
        }
    }

    /// Config with no credentials at all (always falls back to mock data).
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            express: CredentialState::NotConfigured,
            postal: CredentialState::NotConfigured,
            force_mock: false,
        }
    }

    /// Credential state for a carrier.
    #[must_use]
    pub const fn credentials(&self, carrier: Carrier) -> &CredentialState {
        match carrier {
            Carrier::Express => &self.express,
            Carrier::Postal => &self.postal,
        }
    }
}

fn resolve_carrier(carrier: Carrier) -> CredentialState {
    let prefix = carrier.env_prefix();
    let client_id = non_empty_env(&format!("{prefix}_CLIENT_ID"));
    let client_secret = non_empty_env(&format!("{prefix}_CLIENT_SECRET"));

    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => {
            let (base_url, environment) = match non_empty_env(&format!("{prefix}_API_URL")) {
                Some(url) => (url, ApiEnvironment::Live),
                None => (
                    carrier.default_base_url().to_string(),
                    ApiEnvironment::Sandbox,
                ),
            };
            CredentialState::Configured(Credential {
                carrier,
                client_id,
                client_secret,
                base_url,
                environment,
            })
        }
        _ => {
            tracing::debug!(carrier = carrier.cli_name(), "credentials not configured");
            CredentialState::NotConfigured
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "1" || v == "true" || v == "yes"
        })
        .unwrap_or(false)
}
