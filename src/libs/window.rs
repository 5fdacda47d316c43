//! Check-in and check-out window validation.
//!
//! A punch is expected within a tolerance (15 minutes by default) of the
//! shift's configured start or end. Being outside the window is advisory:
//! the result carries a warning message and the caller may still record the
//! punch. The only hard failure is a check-out that does not come after its
//! check-in.

use crate::libs::error::EngineError;
use crate::libs::messages::Message;
use crate::libs::shift::ShiftConfig;
use crate::libs::time_window::{shift_day, ShiftWindow};
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchKind {
    CheckIn,
    CheckOut,
}

/// How far outside the window a punch fell, in whole minutes rounded up
/// and measured from the nearest window boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Early { minutes: i64 },
    Late { minutes: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCheck {
    pub is_valid: bool,
    /// The configured start or end instant the punch is compared with.
    pub expected: NaiveDateTime,
    pub opens: NaiveDateTime,
    pub closes: NaiveDateTime,
    pub deviation: Option<Deviation>,
    /// Human-readable warning, present only when the punch is outside.
    pub message: Option<String>,
}

/// Validates a check-in against the start of the shift occurrence it
/// belongs to: the occurrence whose departure-to-end span is nearest to
/// the punch.
pub fn validate_check_in(candidate: NaiveDateTime, shift: &ShiftConfig, tolerance: Duration) -> WindowCheck {
    let window = ShiftWindow::containing(shift, candidate);
    check(PunchKind::CheckIn, candidate, window.start, tolerance)
}

/// Validates a check-out against the end of the occurrence that
/// `check_in` belongs to.
///
/// # Errors
///
/// Returns [`EngineError::CheckOutBeforeCheckIn`] when `candidate` is not
/// strictly after `check_in`.
pub fn validate_check_out(
    candidate: NaiveDateTime,
    check_in: NaiveDateTime,
    shift: &ShiftConfig,
    tolerance: Duration,
) -> Result<WindowCheck, EngineError> {
    if candidate <= check_in {
        return Err(EngineError::CheckOutBeforeCheckIn {
            check_in,
            check_out: candidate,
        });
    }
    let window = ShiftWindow::anchor(shift, shift_day(shift, check_in));
    Ok(check(PunchKind::CheckOut, candidate, window.end, tolerance))
}

fn check(kind: PunchKind, candidate: NaiveDateTime, expected: NaiveDateTime, tolerance: Duration) -> WindowCheck {
    let opens = expected - tolerance;
    let closes = expected + tolerance;

    let deviation = if candidate < opens {
        Some(Deviation::Early {
            minutes: ceil_minutes(opens - candidate),
        })
    } else if candidate > closes {
        Some(Deviation::Late {
            minutes: ceil_minutes(candidate - closes),
        })
    } else {
        None
    };

    let message = deviation.map(|deviation| {
        match deviation {
            Deviation::Early { minutes } => Message::PunchTooEarly {
                kind,
                minutes,
                boundary: opens.format("%H:%M").to_string(),
            },
            Deviation::Late { minutes } => Message::PunchTooLate {
                kind,
                minutes,
                boundary: closes.format("%H:%M").to_string(),
            },
        }
        .to_string()
    });

    WindowCheck {
        is_valid: deviation.is_none(),
        expected,
        opens,
        closes,
        deviation,
        message,
    }
}

fn ceil_minutes(duration: Duration) -> i64 {
    (duration.num_seconds() + 59) / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::{ShiftTime, Weekdays};
    use chrono::NaiveDate;

    fn shift(start: &str, office_end: &str, end: &str) -> ShiftConfig {
        let start_time: ShiftTime = start.parse().unwrap();
        let departure = ShiftTime::new((start_time.hour() + 23) % 24, start_time.minute()).unwrap();
        ShiftConfig::new(
            "Test",
            departure,
            start_time,
            office_end.parse().unwrap(),
            end.parse().unwrap(),
            Weekdays::all(),
        )
    }

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn tolerance() -> Duration {
        Duration::minutes(15)
    }

    #[test]
    fn test_check_in_inside_window_is_valid() {
        let day = shift("08:00", "17:00", "17:00");
        for (h, m) in [(7, 45), (8, 0), (8, 15)] {
            let result = validate_check_in(dt(10, h, m), &day, tolerance());
            assert!(result.is_valid, "{h}:{m} should be accepted");
            assert!(result.message.is_none());
        }
    }

    #[test]
    fn test_check_in_early_and_late_report_minutes_and_boundary() {
        let day = shift("08:00", "17:00", "17:00");

        let early = validate_check_in(dt(10, 7, 30), &day, tolerance());
        assert!(!early.is_valid);
        assert_eq!(early.deviation, Some(Deviation::Early { minutes: 15 }));
        let message = early.message.unwrap();
        assert!(message.contains("15 minutes early"), "{message}");
        assert!(message.contains("07:45"), "{message}");

        let late = validate_check_in(dt(10, 8, 40), &day, tolerance());
        assert_eq!(late.deviation, Some(Deviation::Late { minutes: 25 }));
        assert!(late.message.unwrap().contains("08:15"));
    }

    #[test]
    fn test_overnight_check_in_after_midnight_matches_previous_start() {
        let night = shift("22:00", "06:00", "06:00");
        let result = validate_check_in(dt(11, 0, 10), &night, tolerance());
        assert_eq!(result.expected, dt(10, 22, 0));
        assert_eq!(result.deviation, Some(Deviation::Late { minutes: 115 }));
    }

    #[test]
    fn test_overnight_check_out_next_morning_is_valid() {
        let night = shift("22:00", "06:00", "06:00");
        let result = validate_check_out(dt(11, 6, 10), dt(10, 22, 5), &night, tolerance()).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.expected, dt(11, 6, 0));
    }

    #[test]
    fn test_check_out_early_against_end() {
        let day = shift("08:00", "17:00", "18:00");
        let result = validate_check_out(dt(10, 16, 0), dt(10, 8, 0), &day, tolerance()).unwrap();
        assert_eq!(result.expected, dt(10, 18, 0));
        assert_eq!(result.deviation, Some(Deviation::Early { minutes: 105 }));
    }

    #[test]
    fn test_check_out_must_follow_check_in() {
        let day = shift("08:00", "17:00", "17:00");
        let err = validate_check_out(dt(10, 8, 0), dt(10, 8, 0), &day, tolerance()).unwrap_err();
        assert_eq!(
            err,
            EngineError::CheckOutBeforeCheckIn {
                check_in: dt(10, 8, 0),
                check_out: dt(10, 8, 0)
            }
        );
    }
}
