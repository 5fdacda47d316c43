//! Recurring work shift definitions.
//!
//! A [`ShiftConfig`] describes one shift as four wall-clock times of day plus
//! the weekdays it recurs on. No calendar date is stored: whether a shift
//! crosses midnight is inferred purely from the ordering of its times, so a
//! shift starting at 22:00 and ending at 06:00 is an overnight shift.
//!
//! ## Invariants
//!
//! Checked by [`ShiftConfig::validate`] before a shift is persisted, all of
//! them wrap-aware:
//!
//! - departure precedes start by at least 5 minutes
//! - the office span (start → office end) lasts at least 120 minutes
//! - end is at or after office end, and any gap between them is at least
//!   30 minutes (the overtime-eligibility floor)
//! - at least one weekday is selected
//!
//! ## Usage
//!
//! ```rust
//! use shiftclock::libs::shift::{ShiftConfig, ShiftTime, Weekdays};
//!
//! let shift = ShiftConfig::new(
//!     "Day",
//!     "07:30".parse()?,
//!     "08:00".parse()?,
//!     "17:00".parse()?,
//!     "18:00".parse()?,
//!     Weekdays::workweek(),
//! );
//! shift.validate()?;
//! assert!(!shift.is_overnight());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::libs::error::{EngineError, ShiftViolation};
use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_DAY: i64 = 24 * 60;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MIN_DEPARTURE_LEAD_MINUTES: i64 = 5;
pub const MIN_OFFICE_SPAN_MINUTES: i64 = 120;
pub const MIN_OVERTIME_SPAN_MINUTES: i64 = 30;

/// Punctuation accepted in shift names besides letters, digits and spaces.
const NAME_PUNCTUATION: &str = "-_()./&,'#+";

/// A validated wall-clock time of day with minute precision.
///
/// Construction through [`ShiftTime::new`] or parsing guarantees
/// `hour ∈ [0, 23]` and `minute ∈ [0, 59]`, so everything downstream can
/// treat the value as infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftTime {
    hour: u32,
    minute: u32,
}

impl ShiftTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, EngineError> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::InvalidShiftTime(format!("{}:{}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(&self) -> i64 {
        (self.hour * 60 + self.minute) as i64
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Range is guaranteed by construction.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Wrap-aware distance in minutes from `self` forward to `later`, in `[0, 1440)`.
    pub fn minutes_until(&self, later: &ShiftTime) -> i64 {
        (later.minutes() - self.minutes()).rem_euclid(MINUTES_PER_DAY)
    }
}

impl From<NaiveTime> for ShiftTime {
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

impl FromStr for ShiftTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidShiftTime(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;

        let is_number = |part: &str| !part.is_empty() && part.len() <= 2 && part.chars().all(|c| c.is_ascii_digit());
        if !is_number(hour) || minute.len() != 2 || !is_number(minute) {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        ShiftTime::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ShiftTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShiftTime> for String {
    fn from(value: ShiftTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Fixed-size weekday set, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Weekdays([bool; 7]);

impl Weekdays {
    pub fn none() -> Self {
        Self([false; 7])
    }

    pub fn all() -> Self {
        Self([true; 7])
    }

    /// Monday through Friday.
    pub fn workweek() -> Self {
        Self([true, true, true, true, true, false, false])
    }

    pub fn from_days(days: &[Weekday]) -> Self {
        let mut set = Self::none();
        for day in days {
            set.insert(*day);
        }
        set
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0[day.num_days_from_monday() as usize] = true;
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0[day.num_days_from_monday() as usize]
    }

    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|selected| *selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.iter().copied().filter(move |day| self.contains(*day))
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl FromStr for Weekdays {
    type Err = String;

    /// Parses `all`, `workweek`, or a comma separated list such as `mon,wed,fri`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "daily" => return Ok(Self::all()),
            "workweek" | "weekdays" => return Ok(Self::workweek()),
            _ => {}
        }

        let mut set = Self::none();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let day: Weekday = part.parse().map_err(|_| format!("Unknown weekday '{}'", part))?;
            set.insert(day);
        }
        Ok(set)
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let days: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", days.join(","))
    }
}

/// One recurring work shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    /// Store identifier; `None` until the shift is persisted.
    pub id: Option<i64>,
    pub name: String,
    /// When the user should leave home; never after `start_time`.
    pub departure_time: ShiftTime,
    pub start_time: ShiftTime,
    /// Boundary between regular hours and overtime.
    pub office_end_time: ShiftTime,
    /// Latest counted time; work beyond it is not credited.
    pub end_time: ShiftTime,
    /// Minutes before start at which the start reminder fires.
    pub remind_before_start: u32,
    /// Minutes after end at which the end reminder fires.
    pub remind_after_end: u32,
    pub days_applied: Weekdays,
    pub show_sign_button: bool,
}

impl ShiftConfig {
    pub fn new(
        name: &str,
        departure_time: ShiftTime,
        start_time: ShiftTime,
        office_end_time: ShiftTime,
        end_time: ShiftTime,
        days_applied: Weekdays,
    ) -> Self {
        ShiftConfig {
            id: None,
            name: name.to_string(),
            departure_time,
            start_time,
            office_end_time,
            end_time,
            remind_before_start: 15,
            remind_after_end: 15,
            days_applied,
            show_sign_button: true,
        }
    }

    /// The shift ends on the calendar day after it starts.
    pub fn is_overnight(&self) -> bool {
        self.end_time.minutes() < self.start_time.minutes()
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.days_applied.contains(day)
    }

    /// Checks every invariant that must hold before the shift is saved.
    pub fn validate(&self) -> Result<(), ShiftViolation> {
        self.validate_name()?;

        let lead = self.departure_time.minutes_until(&self.start_time);
        if lead < MIN_DEPARTURE_LEAD_MINUTES {
            return Err(ShiftViolation::DepartureTooClose {
                min: MIN_DEPARTURE_LEAD_MINUTES,
                actual: lead,
            });
        }

        let office_span = self.start_time.minutes_until(&self.office_end_time);
        if office_span < MIN_OFFICE_SPAN_MINUTES {
            return Err(ShiftViolation::OfficeSpanTooShort {
                min: MIN_OFFICE_SPAN_MINUTES,
                actual: office_span,
            });
        }

        let end_span = self.start_time.minutes_until(&self.end_time);
        if end_span < office_span {
            return Err(ShiftViolation::EndBeforeOfficeEnd);
        }
        let overtime_span = end_span - office_span;
        if overtime_span > 0 && overtime_span < MIN_OVERTIME_SPAN_MINUTES {
            return Err(ShiftViolation::OvertimeSpanTooShort {
                min: MIN_OVERTIME_SPAN_MINUTES,
                actual: overtime_span,
            });
        }

        if self.days_applied.is_empty() {
            return Err(ShiftViolation::NoWeekdays);
        }

        Ok(())
    }

    fn validate_name(&self) -> Result<(), ShiftViolation> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ShiftViolation::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ShiftViolation::NameTooLong { max: MAX_NAME_LENGTH });
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_alphanumeric() || *c == ' ' || NAME_PUNCTUATION.contains(*c)))
        {
            return Err(ShiftViolation::InvalidNameCharacter(bad));
        }
        Ok(())
    }
}
