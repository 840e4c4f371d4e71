//! Carrier descriptors.
//!
//! Defines the supported carriers and their static metadata. Two carriers
//! are modeled: a parcel express carrier and a national postal service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, ShipError};

// =============================================================================
// Carrier Enum
// =============================================================================

/// Supported carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Carrier {
    Express,
    Postal,
}

impl Carrier {
    /// All carriers in display order.
    pub const ALL: &'static [Self] = &[Self::Express, Self::Postal];

    /// CLI name for this carrier.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::Postal => "postal",
        }
    }

    /// Display name for human output.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Express => "Express",
            Self::Postal => "Postal",
        }
    }

    /// Parse from CLI argument.
    pub fn from_cli_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        Self::ALL
            .iter()
            .find(|c| c.cli_name() == lower)
            .copied()
            .ok_or_else(|| ShipError::UnknownCarrier(name.to_string()))
    }

    /// Environment variable prefix for this carrier's credentials.
    #[must_use]
    pub const fn env_prefix(self) -> &'static str {
        match self {
            Self::Express => "EXPRESS",
            Self::Postal => "POSTAL",
        }
    }

    /// Sandbox base URL used when no override is configured.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Express => "https://apis-sandbox.express.example.com",
            Self::Postal => "https://apis-test.postal.example.com",
        }
    }

    /// Default timeout for carrier API calls.
    #[must_use]
    pub const fn default_timeout(self) -> Duration {
        match self {
            // The postal gateway is noticeably slower in its test environment
            Self::Postal => Duration::from_secs(15),
            Self::Express => Duration::from_secs(10),
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_from_cli_name() {
        assert_eq!(
            Carrier::from_cli_name("express").unwrap(),
            Carrier::Express
        );
        assert_eq!(Carrier::from_cli_name("POSTAL").unwrap(), Carrier::Postal);
        assert!(Carrier::from_cli_name("dhl").is_err());
    }

    #[test]
    fn carrier_default_timeout_values() {
        assert_eq!(Carrier::Express.default_timeout().as_secs(), 10);
        assert_eq!(Carrier::Postal.default_timeout().as_secs(), 15);
    }

    #[test]
    fn env_prefixes_are_distinct() {
        assert_ne!(Carrier::Express.env_prefix(), Carrier::Postal.env_prefix());
    }
}
