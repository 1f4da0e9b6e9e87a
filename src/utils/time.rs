//! Time helpers — revenue window boundaries
//!
//! All date boundary math happens here; repositories only see `i64`
//! Unix millis. Windows use the server's local timezone, matching the
//! poll-driven viewer pages.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Date + 00:00:00 in local time → Unix millis
///
/// DST gap fallback: if local midnight does not exist, fall back to UTC.
fn day_start_millis(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    naive
        .and_local_timezone(Local)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of today (local midnight) as Unix millis
pub fn today_start_millis() -> i64 {
    day_start_millis(Local::now().date_naive())
}

/// Start of the current week (Sunday) as Unix millis
pub fn week_start_millis() -> i64 {
    let today = Local::now().date_naive();
    let back = today.weekday().num_days_from_sunday() as i64;
    day_start_millis(today - Duration::days(back))
}

/// Start of the current month (1st) as Unix millis
pub fn month_start_millis() -> i64 {
    let today = Local::now().date_naive();
    day_start_millis(today.with_day(1).unwrap_or(today))
}

/// Today's local calendar date as `YYYY-MM-DD`
pub fn today_date_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Validate a `YYYY-MM-DD` date string
pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Validate an `HH:MM` time string
pub fn is_valid_time(time: &str) -> bool {
    chrono::NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_boundaries_are_ordered() {
        let today = today_start_millis();
        let week = week_start_millis();
        let month = month_start_millis();
        assert!(week <= today);
        assert!(month <= today);
        assert!(today <= chrono::Utc::now().timestamp_millis());
    }

    #[test]
    fn week_starts_on_sunday() {
        let start = week_start_millis();
        let date = chrono::DateTime::from_timestamp_millis(start)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(date.weekday(), chrono::Weekday::Sun);
    }

    #[test]
    fn date_and_time_validation() {
        assert!(is_valid_date("2026-08-24"));
        assert!(!is_valid_date("24/08/2026"));
        assert!(is_valid_time("19:30"));
        assert!(!is_valid_time("25:00"));
    }
}
