//! Text formatting helpers for human output.

use chrono::{DateTime, Utc};

/// "$38.25 USD".
#[must_use]
pub fn money(amount: f64, currency: &str) -> String {
    format!("${amount:.2} {currency}")
}

/// "Mar 6, 2026 2:22 PM UTC".
#[must_use]
pub fn timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %-I:%M %p UTC").to_string()
}

/// Banner appended to human output when the data is synthesized.
#[must_use]
pub const fn mock_banner() -> &'static str {
    "note: showing simulated data (no live carrier credentials)"
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}

/// "EXPRESS_SAVER" -> "Express Saver".
#[must_use]
pub fn service_display(code: &str) -> String {
    code.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// "123 main st" -> "123 Main St".
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
