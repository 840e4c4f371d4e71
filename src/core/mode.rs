//! Live vs. mock mode resolution.
//!
//! Resolved exactly once per request, before any provider work starts. The
//! rest of the pipeline branches on the resolved [`DataMode`], never on raw
//! environment state.

use crate::core::carrier::Carrier;
use crate::core::config::AppConfig;

/// How a request will be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Call the carrier API.
    Live,
    /// Synthesize data locally.
    Mock,
}

impl DataMode {
    #[must_use]
    pub const fn is_mock(self) -> bool {
        matches!(self, Self::Mock)
    }

    /// Label for event logging ("Live" / "Mock").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Mock => "Mock",
        }
    }
}

/// Decide how to serve a request for the given carrier.
///
/// Mock mode wins when the global force-mock switch is set or the carrier
/// has no credentials. This is the only place that decision is made.
#[must_use]
pub fn resolve(config: &AppConfig, carrier: Carrier) -> DataMode {
    if config.force_mock || !config.credentials(carrier).is_configured() {
        DataMode::Mock
    } else {
        DataMode::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ApiEnvironment, Credential, CredentialState};

    fn configured(carrier: Carrier) -> CredentialState {
        CredentialState::Configured(Credential {
            carrier,
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            base_url: carrier.default_base_url().to_string(),
            environment: ApiEnvironment::Sandbox,
        })
    }

    #[test]
    fn missing_credentials_resolve_to_mock() {
        let config = AppConfig::unconfigured();
        assert_eq!(resolve(&config, Carrier::Express), DataMode::Mock);
        assert_eq!(resolve(&config, Carrier::Postal), DataMode::Mock);
    }

    #[test]
    fn configured_carrier_resolves_to_live() {
        let config = AppConfig::new(
            configured(Carrier::Express),
            CredentialState::NotConfigured,
            false,
        );
        assert_eq!(resolve(&config, Carrier::Express), DataMode::Live);
        assert_eq!(resolve(&config, Carrier::Postal), DataMode::Mock);
    }

    #[test]
    fn force_mock_overrides_credentials() {
        let config = AppConfig::new(
            configured(Carrier::Express),
            configured(Carrier::Postal),
            true,
        );
        assert_eq!(resolve(&config, Carrier::Express), DataMode::Mock);
        assert_eq!(resolve(&config, Carrier::Postal), DataMode::Mock);
    }
}
