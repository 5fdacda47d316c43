//! Splits worked time into regular hours and overtime.
//!
//! ## Algorithm
//!
//! ```text
//! effective_in  = max(check_in,  start)
//! effective_out = min(check_out, end)
//! total         = max(0, effective_out - effective_in)
//!
//! effective_out <= office_end  → all regular
//! effective_in  >= office_end  → all overtime
//! otherwise                    → regular up to office_end, rest overtime
//! ```
//!
//! Work outside the shift's own start/end is not counted. Durations are
//! kept exact; hours are rounded to two decimals only when converted for
//! storage, and further rounding is left to presentation.

use crate::libs::shift::ShiftConfig;
use crate::libs::time_window::{shift_day, ShiftWindow};
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    pub total: Duration,
    pub regular: Duration,
    pub overtime: Duration,
}

impl WorkHours {
    pub fn zero() -> Self {
        WorkHours {
            total: Duration::zero(),
            regular: Duration::zero(),
            overtime: Duration::zero(),
        }
    }

    pub fn total_hours(&self) -> f64 {
        to_hours(self.total)
    }

    pub fn regular_hours(&self) -> f64 {
        to_hours(self.regular)
    }

    pub fn overtime_hours(&self) -> f64 {
        to_hours(self.overtime)
    }

    /// Overtime only counts once it reaches `threshold`.
    pub fn is_overtime_awarded(&self, threshold: Duration) -> bool {
        self.overtime > Duration::zero() && self.overtime >= threshold
    }
}

/// Splits a check-in/check-out pair against the shift occurrence the
/// check-in belongs to.
pub fn split(check_in: NaiveDateTime, check_out: NaiveDateTime, shift: &ShiftConfig) -> WorkHours {
    let window = ShiftWindow::anchor(shift, shift_day(shift, check_in));
    split_within(check_in, check_out, &window)
}

/// Splits a check-in/check-out pair against an already anchored window.
pub fn split_within(check_in: NaiveDateTime, check_out: NaiveDateTime, window: &ShiftWindow) -> WorkHours {
    let effective_in = check_in.max(window.start);
    let effective_out = check_out.min(window.end);
    let total = (effective_out - effective_in).max(Duration::zero());

    if total.is_zero() {
        return WorkHours::zero();
    }

    let regular = if effective_out <= window.office_end {
        total
    } else if effective_in >= window.office_end {
        Duration::zero()
    } else {
        window.office_end - effective_in
    };

    WorkHours {
        total,
        regular,
        overtime: total - regular,
    }
}

/// Exact duration → hours rounded to two decimals.
pub fn to_hours(duration: Duration) -> f64 {
    round2(duration.num_seconds() as f64 / 3600.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::{ShiftTime, Weekdays};
    use chrono::NaiveDate;

    fn shift(start: &str, office_end: &str, end: &str) -> ShiftConfig {
        let start_time: ShiftTime = start.parse().unwrap();
        ShiftConfig::new(
            "Test",
            ShiftTime::new((start_time.hour() + 23) % 24, start_time.minute()).unwrap(),
            start_time,
            office_end.parse().unwrap(),
            end.parse().unwrap(),
            Weekdays::all(),
        )
    }

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_regular_only_when_leaving_before_office_end() {
        let hours = split(dt(10, 8, 0), dt(10, 16, 30), &shift("08:00", "17:00", "19:00"));
        assert_eq!(hours.total_hours(), 8.5);
        assert_eq!(hours.regular_hours(), 8.5);
        assert_eq!(hours.overtime_hours(), 0.0);
    }

    #[test]
    fn test_split_at_office_end_and_clamp_to_end() {
        let hours = split(dt(10, 7, 30), dt(10, 20, 0), &shift("08:00", "17:00", "19:00"));
        assert_eq!(hours.total, Duration::hours(11));
        assert_eq!(hours.regular, Duration::hours(9));
        assert_eq!(hours.overtime, Duration::hours(2));
        assert!(hours.is_overtime_awarded(Duration::minutes(30)));
    }

    #[test]
    fn test_overtime_only_when_arriving_after_office_end() {
        let hours = split(dt(10, 17, 30), dt(10, 18, 45), &shift("08:00", "17:00", "19:00"));
        assert_eq!(hours.regular, Duration::zero());
        assert_eq!(hours.overtime, Duration::minutes(75));
    }

    #[test]
    fn test_short_overtime_is_not_awarded() {
        let hours = split(dt(10, 8, 0), dt(10, 17, 20), &shift("08:00", "17:00", "19:00"));
        assert_eq!(hours.overtime, Duration::minutes(20));
        assert!(!hours.is_overtime_awarded(Duration::minutes(30)));
    }

    #[test]
    fn test_overnight_split() {
        let night = shift("22:00", "06:00", "08:00");
        let hours = split(dt(10, 21, 50), dt(11, 7, 0), &night);
        assert_eq!(hours.regular, Duration::hours(8));
        assert_eq!(hours.overtime, Duration::hours(1));

        let late_arrival = split(dt(11, 0, 30), dt(11, 6, 0), &night);
        assert_eq!(late_arrival.total, Duration::minutes(330));
    }

    #[test]
    fn test_punches_outside_shift_count_nothing() {
        let hours = split(dt(10, 5, 0), dt(10, 7, 0), &shift("08:00", "17:00", "17:00"));
        assert_eq!(hours, WorkHours::zero());
    }

    #[test]
    fn test_parts_always_sum_to_total() {
        let s = shift("08:00", "17:00", "19:00");
        for in_minutes in (6 * 60..20 * 60).step_by(35) {
            for out_minutes in (in_minutes..22 * 60).step_by(50) {
                let check_in = dt(10, 0, 0) + Duration::minutes(in_minutes);
                let check_out = dt(10, 0, 0) + Duration::minutes(out_minutes);
                let hours = split(check_in, check_out, &s);
                assert_eq!(hours.regular + hours.overtime, hours.total);
                assert!((hours.regular_hours() + hours.overtime_hours() - hours.total_hours()).abs() <= 0.011);
                assert_eq!(split(check_in, check_out, &s), hours);
            }
        }
    }

    #[test]
    fn test_hours_round_to_two_decimals() {
        assert_eq!(to_hours(Duration::minutes(20)), 0.33);
        assert_eq!(to_hours(Duration::minutes(50)), 0.83);
        assert_eq!(round2(1.005_1), 1.01);
    }
}
