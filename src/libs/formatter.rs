//! Formatting helpers for console output.
//!
//! Stored hours keep two decimals; everything shown to the user goes
//! through these functions so tables and messages agree on precision.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Formats a duration as "HH:MM". Negative durations show as "00:00".
///
/// ```rust
/// use shiftclock::libs::formatter::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
/// assert_eq!(format_duration(&Duration::hours(-1)), "00:00");
/// ```
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Hours with one decimal, for display only.
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

/// Instant as "HH:MM", with the date prefixed when it differs from `day`.
pub fn format_instant(instant: &NaiveDateTime, day: &NaiveDate) -> String {
    if instant.date() == *day {
        instant.format("%H:%M").to_string()
    } else {
        instant.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::hours(8)), "08:00");
        assert_eq!(format_duration(&Duration::minutes(45)), "00:45");
        assert_eq!(format_duration(&Duration::hours(26)), "26:00");
    }

    #[test]
    fn test_format_hours_rounds_to_one_decimal() {
        assert_eq!(format_hours(8.03), "8.0");
        assert_eq!(format_hours(7.67), "7.7");
        assert_eq!(format_hours(0.0), "0.0");
    }

    #[test]
    fn test_format_instant_marks_next_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let same = day.and_hms_opt(22, 0, 0).unwrap();
        let next = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap().and_hms_opt(6, 0, 0).unwrap();
        assert_eq!(format_instant(&same, &day), "22:00");
        assert_eq!(format_instant(&next, &day), "2025-03-11 06:00");
    }
}
