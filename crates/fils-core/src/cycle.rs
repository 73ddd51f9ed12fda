//! Billing-cycle calculator
//!
//! A billing cycle runs from the 23rd of month M through the 22nd of
//! month M+1 and is labeled by its starting month, e.g. "Feb 2026" for
//! 2026-02-23 through 2026-03-22.

use chrono::{Datelike, NaiveDate, Utc};

/// Day of month on which a new billing cycle starts
pub const CYCLE_START_DAY: u32 = 23;

/// Billing-cycle label for a date.
///
/// Days 1-22 belong to the cycle that started on the 23rd of the
/// previous month.
pub fn cycle_for(date: NaiveDate) -> String {
    let (year, month) = if date.day() >= CYCLE_START_DAY {
        (date.year(), date.month())
    } else if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };

    // First of the cycle's starting month always exists
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(start) => start.format("%b %Y").to_string(),
        None => date.format("%b %Y").to_string(),
    }
}

/// Billing-cycle label for a `YYYY-MM-DD` string.
///
/// Malformed dates fall back to today's cycle so that a bad date in an
/// inbound payload degrades gracefully instead of failing the request.
pub fn cycle_for_str(date: &str) -> String {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap_or_else(|_| Utc::now().date_naive());
    cycle_for(date)
}

/// Parse a `YYYY-MM-DD` string, falling back to today on failure
pub fn parse_date_or_today(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_else(|_| Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_before_boundary_belongs_to_previous_cycle() {
        assert_eq!(cycle_for(d(2026, 2, 22)), "Jan 2026");
    }

    #[test]
    fn boundary_day_starts_new_cycle() {
        assert_eq!(cycle_for(d(2026, 2, 23)), "Feb 2026");
    }

    #[test]
    fn late_month_days_stay_in_current_cycle() {
        assert_eq!(cycle_for(d(2026, 2, 28)), "Feb 2026");
        assert_eq!(cycle_for(d(2026, 7, 31)), "Jul 2026");
    }

    #[test]
    fn january_rolls_back_to_december() {
        assert_eq!(cycle_for(d(2026, 1, 10)), "Dec 2025");
        assert_eq!(cycle_for(d(2026, 1, 23)), "Jan 2026");
    }

    #[test]
    fn string_form_matches_date_form() {
        assert_eq!(cycle_for_str("2026-02-22"), "Jan 2026");
        assert_eq!(cycle_for_str("2026-02-23"), "Feb 2026");
    }

    #[test]
    fn malformed_date_falls_back_to_today() {
        let today = Utc::now().date_naive();
        assert_eq!(cycle_for_str("not-a-date"), cycle_for(today));
        assert_eq!(parse_date_or_today("2026-13-45"), today);
    }
}
