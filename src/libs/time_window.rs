//! Anchors a shift's wall-clock times to a concrete calendar date.
//!
//! Overnight shifts are not flagged anywhere; the wrap is inferred from the
//! ordering of the configured times. Office end and end are each moved to
//! the next day when their time of day is earlier than the start time.
//! Departure stays with the start: when its time of day is later than the
//! start time it belongs to the previous evening, so that departure never
//! falls after start.
//!
//! ```text
//!  Day shift 08:00-17:00/18:00       Night shift 22:00-06:00
//!  D 07:30 departure                 D   21:30 departure
//!  D 08:00 start                     D   22:00 start
//!  D 17:00 office end                D+1 06:00 office end
//!  D 18:00 end                       D+1 06:00 end
//! ```

use crate::libs::shift::{ShiftConfig, ShiftTime};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Hour of day before which an ambiguous punch on an overnight shift is
/// attributed to the shift that started the previous day.
pub const OVERNIGHT_CUTOFF_HOUR: u32 = 12;

/// Concrete instants of one shift occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    /// The calendar day the shift starts on.
    pub date: NaiveDate,
    pub departure: NaiveDateTime,
    pub start: NaiveDateTime,
    pub office_end: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ShiftWindow {
    /// Anchors `shift` to `date`, the local day on which it starts.
    pub fn anchor(shift: &ShiftConfig, date: NaiveDate) -> Self {
        let start = at(date, &shift.start_time);

        let mut departure = at(date, &shift.departure_time);
        if shift.departure_time.minutes() > shift.start_time.minutes() {
            departure -= Duration::days(1);
        }

        let wrap = |time: &ShiftTime| {
            let instant = at(date, time);
            if time.minutes() < shift.start_time.minutes() {
                instant + Duration::days(1)
            } else {
                instant
            }
        };

        ShiftWindow {
            date,
            departure,
            start,
            office_end: wrap(&shift.office_end_time),
            end: wrap(&shift.end_time),
        }
    }

    /// Anchors `shift` to the occurrence that `instant` belongs to.
    pub fn containing(shift: &ShiftConfig, instant: NaiveDateTime) -> Self {
        Self::anchor(shift, shift_day(shift, instant))
    }

    pub fn is_overnight(&self) -> bool {
        self.end.date() > self.start.date()
    }

    /// How far `instant` lies outside `[departure, end]`; zero inside.
    pub fn distance_to(&self, instant: NaiveDateTime) -> Duration {
        if instant < self.departure {
            self.departure - instant
        } else if instant > self.end {
            instant - self.end
        } else {
            Duration::zero()
        }
    }

    /// Nominal regular span, start to office end.
    pub fn office_span(&self) -> Duration {
        self.office_end - self.start
    }

    /// Nominal overtime span, office end to end.
    pub fn overtime_span(&self) -> Duration {
        self.end - self.office_end
    }
}

/// The local day on which the shift occurrence containing `instant` starts.
///
/// The occurrences starting the day before, the same day and the day after
/// are anchored, and the one whose departure-to-end span is nearest to
/// `instant` wins (distance zero when inside). A morning-start overnight
/// shift therefore keeps its check-in on the start day and its check-out
/// after midnight on the same occurrence. When two occurrences are equally
/// near, an overnight shift falls back to the noon rule: before noon the
/// previous day's occurrence, from noon on today's.
pub fn shift_day(shift: &ShiftConfig, instant: NaiveDateTime) -> NaiveDate {
    let date = instant.date();
    let fallback = if shift.is_overnight() && instant.hour() < OVERNIGHT_CUTOFF_HOUR {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    };

    [date.pred_opt(), Some(date), date.succ_opt()]
        .into_iter()
        .flatten()
        .min_by_key(|candidate| {
            let window = ShiftWindow::anchor(shift, *candidate);
            let tie_break = (*candidate - fallback).num_days().abs();
            (window.distance_to(instant), tie_break)
        })
        .unwrap_or(fallback)
}

fn at(date: NaiveDate, time: &ShiftTime) -> NaiveDateTime {
    date.and_time(time.to_naive_time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::Weekdays;

    fn shift(departure: &str, start: &str, office_end: &str, end: &str) -> ShiftConfig {
        ShiftConfig::new(
            "Test",
            departure.parse().unwrap(),
            start.parse().unwrap(),
            office_end.parse().unwrap(),
            end.parse().unwrap(),
            Weekdays::all(),
        )
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        date(d).and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_day_shift_stays_on_reference_date() {
        let window = ShiftWindow::anchor(&shift("07:30", "08:00", "17:00", "18:00"), date(10));
        assert_eq!(window.departure, dt(10, 7, 30));
        assert_eq!(window.start, dt(10, 8, 0));
        assert_eq!(window.office_end, dt(10, 17, 0));
        assert_eq!(window.end, dt(10, 18, 0));
        assert!(!window.is_overnight());
        assert_eq!(window.office_span(), Duration::hours(9));
        assert_eq!(window.overtime_span(), Duration::hours(1));
    }

    #[test]
    fn test_overnight_end_lands_exactly_one_day_later() {
        let night = shift("21:30", "22:00", "06:00", "06:00");
        let window = ShiftWindow::anchor(&night, date(10));
        assert_eq!(window.start, dt(10, 22, 0));
        assert_eq!(window.office_end, dt(11, 6, 0));
        assert_eq!(window.end, dt(11, 6, 0));
        assert!(window.is_overnight());
        assert_eq!(night.is_overnight(), window.is_overnight());
    }

    #[test]
    fn test_office_end_and_end_wrap_independently() {
        let window = ShiftWindow::anchor(&shift("15:00", "16:00", "23:00", "01:00"), date(10));
        assert_eq!(window.office_end, dt(10, 23, 0));
        assert_eq!(window.end, dt(11, 1, 0));
        assert!(window.office_end >= window.start);
        assert!(window.end >= window.office_end);
    }

    #[test]
    fn test_departure_before_midnight_start() {
        let window = ShiftWindow::anchor(&shift("23:40", "00:10", "08:00", "08:00"), date(10));
        assert_eq!(window.departure, dt(9, 23, 40));
        assert_eq!(window.start, dt(10, 0, 10));
        assert!(!window.is_overnight());
    }

    #[test]
    fn test_shift_day_resolution() {
        let night = shift("21:30", "22:00", "06:00", "06:00");
        assert_eq!(shift_day(&night, dt(11, 5, 50)), date(10));
        assert_eq!(shift_day(&night, dt(10, 21, 50)), date(10));

        let day = shift("07:30", "08:00", "17:00", "17:00");
        assert_eq!(shift_day(&day, dt(11, 7, 50)), date(11));
    }

    #[test]
    fn test_morning_start_overnight_shift_keeps_its_start_day() {
        let long = shift("09:30", "10:00", "20:00", "02:00");
        assert!(long.is_overnight());
        assert_eq!(shift_day(&long, dt(10, 9, 30)), date(10));
        assert_eq!(shift_day(&long, dt(10, 10, 0)), date(10));
        assert_eq!(shift_day(&long, dt(11, 1, 50)), date(10));
    }

    #[test]
    fn test_late_day_shift_check_out_after_midnight() {
        let evening = shift("13:30", "14:00", "23:00", "23:30");
        assert!(!evening.is_overnight());
        assert_eq!(shift_day(&evening, dt(11, 0, 10)), date(10));
        assert_eq!(shift_day(&evening, dt(11, 13, 40)), date(11));
    }

    #[test]
    fn test_departure_before_midnight_belongs_to_next_day() {
        let early = shift("23:40", "00:10", "08:00", "08:00");
        assert_eq!(shift_day(&early, dt(9, 23, 45)), date(10));
        assert_eq!(shift_day(&early, dt(10, 7, 55)), date(10));
    }

    #[test]
    fn test_equally_near_night_punch_uses_noon_rule() {
        // The gap between 06:00 end and 17:00 departure is centered on 11:30.
        let night = shift("17:00", "17:30", "02:00", "06:00");
        assert_eq!(shift_day(&night, dt(11, 11, 30)), date(10));
        assert_eq!(shift_day(&night, dt(11, 11, 29)), date(10));
        assert_eq!(shift_day(&night, dt(11, 11, 31)), date(11));
    }

    #[test]
    fn test_anchoring_is_consistent_for_all_overnight_ends() {
        for end_hour in 0..24u32 {
            let s = shift("08:30", "09:00", "09:00", &format!("{:02}:00", end_hour));
            let window = ShiftWindow::anchor(&s, date(10));
            assert_eq!(s.is_overnight(), window.is_overnight(), "end {end_hour}:00");
            assert!(window.end >= window.start);
        }
    }
}
