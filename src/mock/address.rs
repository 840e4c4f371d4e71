//! Synthesized address validation.
//!
//! A small rule engine stands in for the carriers' reference data: an
//! allowlist of well-known addresses validates with high confidence, deny
//! rules catch obviously fabricated input, and everything else that looks
//! structurally sound passes at medium confidence.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::{AddressRequest, AddressValidationResult, Confidence, StandardizedAddress};
use crate::util::format::title_case;

/// A known-good address that always validates.
#[derive(Debug, Clone)]
pub struct KnownAddress {
    pub street_prefix: &'static str,
    pub city: &'static str,
    pub state: &'static str,
}

/// Validation rules: deny patterns and lists plus the allowlist.
///
/// The defaults cover the common fabricated inputs seen in demos; callers
/// embedding the library can swap in their own set.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub deny_patterns: Vec<Regex>,
    pub deny_states: Vec<&'static str>,
    pub deny_zips: Vec<&'static str>,
    pub allowlist: Vec<KnownAddress>,
}

static DEFAULT_DENY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)fake|test|invalid|nowhere|example",
        r"(?i)123.*fake",
        r"(?i)000.*street",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            deny_patterns: DEFAULT_DENY_PATTERNS.clone(),
            deny_states: vec!["ZZ", "XX", "AA", "00"],
            deny_zips: vec!["00000", "99999", "12345"],
            allowlist: vec![
                KnownAddress {
                    street_prefix: "123 main st",
                    city: "indianapolis",
                    state: "IN",
                },
                KnownAddress {
                    street_prefix: "1600 pennsylvania",
                    city: "washington",
                    state: "DC",
                },
                KnownAddress {
                    street_prefix: "1 infinite loop",
                    city: "cupertino",
                    state: "CA",
                },
            ],
        }
    }
}

impl RuleSet {
    fn matches_allowlist(&self, request: &AddressRequest) -> bool {
        let street = request.street.to_lowercase();
        let city = request.city.to_lowercase();
        self.allowlist.iter().any(|known| {
            street.starts_with(known.street_prefix)
                && city == known.city
                && request.state.eq_ignore_ascii_case(known.state)
        })
    }

    fn matches_deny(&self, request: &AddressRequest) -> bool {
        let haystack = format!("{} {}", request.street, request.city);
        self.deny_patterns.iter().any(|re| re.is_match(&haystack))
            || self
                .deny_states
                .iter()
                .any(|s| request.state.eq_ignore_ascii_case(s))
            || self.deny_zips.iter().any(|z| request.zip.starts_with(z))
    }

    /// Validate an address against the rules.
    #[must_use]
    pub fn validate(&self, request: &AddressRequest) -> AddressValidationResult {
        if self.matches_allowlist(request) {
            return AddressValidationResult {
                is_valid: true,
                standardized: Some(standardize(request)),
                confidence: Some(Confidence::High),
                deliverable: Some(true),
                suggestions: Vec::new(),
                is_mock_data: true,
            };
        }

        if self.matches_deny(request) {
            return AddressValidationResult {
                is_valid: false,
                standardized: None,
                confidence: Some(Confidence::Low),
                deliverable: Some(false),
                suggestions: vec![
                    "Verify the street number and name".to_string(),
                    "Confirm the ZIP code matches the city and state".to_string(),
                ],
                is_mock_data: true,
            };
        }

        AddressValidationResult {
            is_valid: true,
            standardized: Some(standardize(request)),
            confidence: Some(Confidence::Medium),
            deliverable: Some(true),
            suggestions: Vec::new(),
            is_mock_data: true,
        }
    }
}

/// Carrier-style standardization: title-cased street and city, uppercase
/// state, ZIP and country passed through.
fn standardize(request: &AddressRequest) -> StandardizedAddress {
    StandardizedAddress {
        street: title_case(&request.street),
        city: title_case(&request.city),
        state: request.state.to_uppercase(),
        zip: request.zip.clone(),
        country: request.country.to_uppercase(),
    }
}

/// Validate with the default rules.
#[must_use]
pub fn synthesize(request: &AddressRequest) -> AddressValidationResult {
    RuleSet::default().validate(request)
}
