//! Business-day date arithmetic.
//!
//! Shared by transit-time and rate synthesis. A business day is any weekday;
//! Saturday and Sunday never count. All routines are deterministic for the
//! same inputs.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Whether the date falls on a weekday.
#[must_use]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance `count` business days forward from `start`.
///
/// Advancing 0 days returns `start` unchanged, even on a weekend. The result
/// for `count >= 1` always lands on a weekday.
#[must_use]
pub fn add_business_days(start: NaiveDate, count: u32) -> NaiveDate {
    let mut date = start;
    let mut added = 0;
    while added < count {
        date = date + Days::new(1);
        if is_business_day(date) {
            added += 1;
        }
    }
    date
}

/// Walk `count` business days backward from `start`.
///
/// Inverse of [`add_business_days`] whenever `start` is a weekday.
#[must_use]
pub fn subtract_business_days(start: NaiveDate, count: u32) -> NaiveDate {
    let mut date = start;
    let mut removed = 0;
    while removed < count {
        date = date - Days::new(1);
        if is_business_day(date) {
            removed += 1;
        }
    }
    date
}

/// Count business days from `from` (exclusive) to `to` (inclusive).
///
/// Returns 0 when `to` is on or before `from`.
#[must_use]
pub fn business_days_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut date = from;
    let mut count = 0;
    while date < to {
        date = date + Days::new(1);
        if is_business_day(date) {
            count += 1;
        }
    }
    count
}

/// Short "Thu, Jul 17" label for a delivery date.
#[must_use]
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_days_is_identity() {
        // A Saturday stays put with offset 0
        let sat = date(2026, 3, 7);
        assert_eq!(add_business_days(sat, 0), sat);
        assert_eq!(subtract_business_days(sat, 0), sat);
    }

    #[test]
    fn skips_weekends() {
        // Friday + 1 business day lands on Monday
        let fri = date(2026, 3, 6);
        assert_eq!(add_business_days(fri, 1), date(2026, 3, 9));
        // Friday + 3 crosses a full weekend
        assert_eq!(add_business_days(fri, 3), date(2026, 3, 11));
    }

    #[test]
    fn never_lands_on_weekend() {
        let start = date(2026, 3, 2); // a Monday
        for n in 1..30 {
            assert!(is_business_day(add_business_days(start, n)), "n = {n}");
        }
    }

    #[test]
    fn subtract_inverts_add_from_weekdays() {
        let start = date(2026, 3, 3); // a Tuesday
        for n in 0..15 {
            let forward = add_business_days(start, n);
            assert_eq!(subtract_business_days(forward, n), start, "n = {n}");
        }
    }

    #[test]
    fn counts_business_days_across_weekend() {
        let thu = date(2026, 3, 5);
        assert_eq!(business_days_between(thu, date(2026, 3, 6)), 1);
        // Thursday to Monday spans one weekend
        assert_eq!(business_days_between(thu, date(2026, 3, 9)), 2);
        assert_eq!(business_days_between(thu, thu), 0);
        assert_eq!(business_days_between(thu, date(2026, 3, 4)), 0);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let start = date(2026, 7, 10);
        assert_eq!(add_business_days(start, 5), add_business_days(start, 5));
    }

    #[test]
    fn formats_short_day() {
        assert_eq!(format_day(date(2025, 7, 17)), "Thu, Jul 17");
    }
}
