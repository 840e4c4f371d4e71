//! Error types for shipnode.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! - **Configuration**: missing or invalid carrier credentials. A missing
//!   credential is not a failure; it routes the request to mock mode.
//! - **Authentication**: the carrier rejected our credential exchange.
//! - **Validation**: malformed caller input, rejected before any network call.
//! - **Provider**: rate limits, carrier outages, unexpected API responses.
//! - **Network**: timeouts and transport failures (retryable by the caller).
//! - **Internal**: bugs and unclassified errors.
//!
//! Each error has a stable code (e.g., `SHIP-A001`) for programmatic handling.
//! `NotFound` conditions (unknown tracking numbers) never reach this type:
//! provider clients normalize them into empty/unknown results.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Carrier credential exchange rejected.
    Authentication,
    /// Transport failures (timeout, DNS, connection refused).
    Network,
    /// Missing or invalid configuration.
    Configuration,
    /// Carrier-side issues (rate limits, outages, malformed responses).
    Provider,
    /// Malformed caller input.
    Validation,
    /// Bugs, unexpected state, unclassified.
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication error",
            Self::Network => "Network error",
            Self::Configuration => "Configuration error",
            Self::Provider => "Provider error",
            Self::Validation => "Validation error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Authentication => "A",
            Self::Network => "N",
            Self::Configuration => "C",
            Self::Provider => "P",
            Self::Validation => "V",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Invalid caller input or configuration
    InvalidInput = 2,
    /// Parse/format errors in a carrier response
    ParseError = 3,
    /// Timeout
    Timeout = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Main error type for shipnode operations.
///
/// Each variant has:
/// - A stable error code (e.g., `SHIP-A001`)
/// - A category for classification
/// - A retryable flag for caller-side retry logic
#[derive(Error, Debug)]
pub enum ShipError {
    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Credentials are not configured for the carrier.
    ///
    /// The pipeline treats this as a routing signal (fall back to mock data),
    /// not a caller-visible failure.
    #[error("credentials not configured for {carrier}")]
    NotConfigured { carrier: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid { key: String, message: String },

    /// Unknown carrier name.
    #[error("unknown carrier: {0}")]
    UnknownCarrier(String),

    // ==========================================================================
    // Authentication errors (Category: Authentication)
    // ==========================================================================
    /// The carrier rejected the credential exchange.
    #[error("authentication failed for {carrier}: {message}")]
    AuthFailed { carrier: String, message: String },

    // ==========================================================================
    // Validation errors (Category: Validation)
    // ==========================================================================
    /// Malformed caller input, rejected before any network call.
    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    // ==========================================================================
    // Provider errors (Category: Provider)
    // ==========================================================================
    /// Rate limited by the carrier.
    #[error("rate limited by {carrier}")]
    RateLimited {
        carrier: String,
        retry_after: Option<Duration>,
    },

    /// Carrier service is temporarily unavailable (5xx).
    #[error("carrier {carrier} unavailable: {message}")]
    ProviderUnavailable { carrier: String, message: String },

    /// Carrier API returned an unexpected error.
    #[error("carrier {carrier} API error: {message}")]
    ProviderApiError {
        carrier: String,
        status_code: Option<u16>,
        message: String,
    },

    /// Failed to parse a carrier response.
    #[error("failed to parse {carrier} response: {message}")]
    ParseResponse { carrier: String, message: String },

    // ==========================================================================
    // Network errors (Category: Network)
    // ==========================================================================
    /// Request timed out.
    #[error("request timeout after {seconds}s for {carrier}")]
    Timeout { carrier: String, seconds: u64 },

    /// Transport-level failure.
    #[error("network error for {carrier}: {message}")]
    Network { carrier: String, message: String },

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShipError {
    /// Map error to a CLI exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput { .. }
            | Self::ConfigInvalid { .. }
            | Self::UnknownCarrier(_)
            | Self::NotConfigured { .. } => ExitCode::InvalidInput,

            Self::ParseResponse { .. } => ExitCode::ParseError,

            Self::Timeout { .. } => ExitCode::Timeout,

            Self::AuthFailed { .. }
            | Self::RateLimited { .. }
            | Self::ProviderUnavailable { .. }
            | Self::ProviderApiError { .. }
            | Self::Network { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::AuthFailed { .. } => ErrorCategory::Authentication,

            Self::Timeout { .. } | Self::Network { .. } => ErrorCategory::Network,

            Self::NotConfigured { .. } | Self::ConfigInvalid { .. } | Self::UnknownCarrier(_) => {
                ErrorCategory::Configuration
            }

            Self::RateLimited { .. }
            | Self::ProviderUnavailable { .. }
            | Self::ProviderApiError { .. }
            | Self::ParseResponse { .. } => ErrorCategory::Provider,

            Self::InvalidInput { .. } => ErrorCategory::Validation,

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `SHIP-{category}{number}` where category is:
    /// - A: Authentication
    /// - N: Network
    /// - C: Configuration
    /// - P: Provider
    /// - V: Validation
    /// - X: Internal
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AuthFailed { .. } => "SHIP-A001",

            Self::Timeout { .. } => "SHIP-N001",
            Self::Network { .. } => "SHIP-N099",

            Self::NotConfigured { .. } => "SHIP-C001",
            Self::ConfigInvalid { .. } => "SHIP-C002",
            Self::UnknownCarrier(_) => "SHIP-C010",

            Self::RateLimited { .. } => "SHIP-P001",
            Self::ProviderUnavailable { .. } => "SHIP-P002",
            Self::ProviderApiError { .. } => "SHIP-P003",
            Self::ParseResponse { .. } => "SHIP-P020",

            Self::InvalidInput { .. } => "SHIP-V001",

            Self::Io(_) => "SHIP-X001",
            Self::Json(_) => "SHIP-X002",
            Self::Other(_) => "SHIP-X099",
        }
    }

    /// Returns whether the error is potentially recoverable by retrying.
    ///
    /// The core never retries on its own; this flag is for callers.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::Network { .. }
                | Self::RateLimited { .. }
                | Self::ProviderUnavailable { .. }
        )
    }

    /// Returns whether the pipeline should degrade to synthesized data
    /// instead of surfacing this error to the caller.
    ///
    /// Missing configuration and transient transport/carrier outages trigger
    /// fallback; validation and authentication failures never do.
    #[must_use]
    pub const fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured { .. }
                | Self::Timeout { .. }
                | Self::Network { .. }
                | Self::ProviderUnavailable { .. }
        )
    }

    /// Returns the retry-after duration if this error specifies one.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns the carrier name if this error is carrier-specific.
    #[must_use]
    pub fn carrier(&self) -> Option<&str> {
        match self {
            Self::NotConfigured { carrier }
            | Self::AuthFailed { carrier, .. }
            | Self::RateLimited { carrier, .. }
            | Self::ProviderUnavailable { carrier, .. }
            | Self::ProviderApiError { carrier, .. }
            | Self::ParseResponse { carrier, .. }
            | Self::Timeout { carrier, .. }
            | Self::Network { carrier, .. } => Some(carrier),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShipError>;
