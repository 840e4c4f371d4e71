//! Carrier-specific clients and normalizers.
//!
//! Each carrier has its own submodule with one file per operation. Every
//! operation file pairs the provider's wire schemas (explicit `Deserialize`
//! structs, no dynamic JSON) with a pure `normalize` function into the
//! internal model.

pub mod express;
pub mod postal;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a provider timestamp, tolerating RFC 3339 with or without an
/// offset. Returns `None` for anything unrecognizable; callers degrade
/// rather than fail.
#[must_use]
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_and_naive_timestamps() {
        assert!(parse_timestamp("2025-07-12T16:30:00Z").is_some());
        assert!(parse_timestamp("2025-07-12T16:30:00-05:00").is_some());
        assert!(parse_timestamp("2025-07-12T16:30:00").is_some());
        assert!(parse_timestamp("next tuesday").is_none());
    }
}
