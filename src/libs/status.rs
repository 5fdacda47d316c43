//! Day-status classification.
//!
//! Turns one day's attendance events and the shift active that day into a
//! single [`DayStatus`] with worked hours and remarks.
//!
//! ## Rules, in order
//!
//! 1. No events → `NotUpdated`.
//! 2. Any of `go_work`, `check_in`, `check_out` missing → `Incomplete`. A
//!    bare `complete` never stands in for the others.
//! 3. All four logged within the quick-cycle limit (5 minutes) → the user
//!    tapped through the buttons to mark the day as worked: nominal shift
//!    hours are credited and the day is `FullAttendance`.
//! 4. Otherwise the real check-in/check-out times decide, with a 5 minute
//!    grace on both ends and overtime awarded from 30 minutes:
//!    `LateAndEarly` > `LateArrival` > `EarlyDeparture` > `Overtime` >
//!    `FullAttendance`. Remarks list every condition that applies.
//!
//! Leave, sick days, holidays and absences are never derived. They are
//! picked by the user and stored as an override that bypasses the rules.

use crate::libs::attendance::{ActionType, AttendanceEvent, DayLog};
use crate::libs::config::RulesConfig;
use crate::libs::messages::Message;
use crate::libs::shift::ShiftConfig;
use crate::libs::time_window::ShiftWindow;
use crate::libs::work_hours::{split_within, WorkHours};
use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    NotUpdated,
    Incomplete,
    FullAttendance,
    LateArrival,
    EarlyDeparture,
    LateAndEarly,
    Overtime,
    Leave,
    Sick,
    Holiday,
    Absent,
}

impl DayStatus {
    pub const ALL: [DayStatus; 11] = [
        DayStatus::NotUpdated,
        DayStatus::Incomplete,
        DayStatus::FullAttendance,
        DayStatus::LateArrival,
        DayStatus::EarlyDeparture,
        DayStatus::LateAndEarly,
        DayStatus::Overtime,
        DayStatus::Leave,
        DayStatus::Sick,
        DayStatus::Holiday,
        DayStatus::Absent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::NotUpdated => "not_updated",
            DayStatus::Incomplete => "incomplete",
            DayStatus::FullAttendance => "full_attendance",
            DayStatus::LateArrival => "late_arrival",
            DayStatus::EarlyDeparture => "early_departure",
            DayStatus::LateAndEarly => "late_and_early",
            DayStatus::Overtime => "overtime",
            DayStatus::Leave => "leave",
            DayStatus::Sick => "sick",
            DayStatus::Holiday => "holiday",
            DayStatus::Absent => "absent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::NotUpdated => "Not updated",
            DayStatus::Incomplete => "Incomplete",
            DayStatus::FullAttendance => "Full attendance",
            DayStatus::LateArrival => "Late arrival",
            DayStatus::EarlyDeparture => "Early departure",
            DayStatus::LateAndEarly => "Late & early",
            DayStatus::Overtime => "Overtime",
            DayStatus::Leave => "Leave",
            DayStatus::Sick => "Sick",
            DayStatus::Holiday => "Holiday",
            DayStatus::Absent => "Absent",
        }
    }

    /// Set only by an explicit user pick.
    pub fn is_manual(&self) -> bool {
        matches!(self, DayStatus::Leave | DayStatus::Sick | DayStatus::Holiday | DayStatus::Absent)
    }

    /// The user showed up and the day counts as worked.
    pub fn is_attended(&self) -> bool {
        matches!(
            self,
            DayStatus::FullAttendance
                | DayStatus::LateArrival
                | DayStatus::EarlyDeparture
                | DayStatus::LateAndEarly
                | DayStatus::Overtime
        )
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown day status '{}'", s))
    }
}

/// Statuses a user can pick by hand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualStatus {
    Leave,
    Sick,
    Holiday,
    Absent,
}

impl From<ManualStatus> for DayStatus {
    fn from(status: ManualStatus) -> Self {
        match status {
            ManualStatus::Leave => DayStatus::Leave,
            ManualStatus::Sick => DayStatus::Sick,
            ManualStatus::Holiday => DayStatus::Holiday,
            ManualStatus::Absent => DayStatus::Absent,
        }
    }
}

/// Derived (or manually picked) outcome of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayWorkStatus {
    pub date: NaiveDate,
    pub status: DayStatus,
    /// Credited hours, two decimals.
    pub total_work_time: f64,
    /// Credited hours up to office end, two decimals. Overtime below the
    /// threshold is in the total but in neither this nor `overtime`.
    #[serde(default)]
    pub regular_hours: f64,
    /// Awarded overtime hours, two decimals.
    pub overtime: f64,
    pub remarks: String,
    /// Picked by the user; the classifier leaves it alone.
    pub manual: bool,
}

impl DayWorkStatus {
    pub fn not_updated(date: NaiveDate) -> Self {
        Self::without_hours(date, DayStatus::NotUpdated, Message::RemarkNoEvents.to_string())
    }

    pub fn manual(date: NaiveDate, status: ManualStatus) -> Self {
        let status = DayStatus::from(status);
        DayWorkStatus {
            manual: true,
            ..Self::without_hours(date, status, Message::RemarkManual(status.label().to_string()).to_string())
        }
    }

    fn without_hours(date: NaiveDate, status: DayStatus, remarks: String) -> Self {
        DayWorkStatus {
            date,
            status,
            total_work_time: 0.0,
            regular_hours: 0.0,
            overtime: 0.0,
            remarks,
            manual: false,
        }
    }

    fn with_hours(date: NaiveDate, status: DayStatus, hours: &WorkHours, overtime_awarded: bool, remarks: String) -> Self {
        DayWorkStatus {
            date,
            status,
            total_work_time: hours.total_hours(),
            regular_hours: hours.regular_hours(),
            overtime: if overtime_awarded { hours.overtime_hours() } else { 0.0 },
            remarks,
            manual: false,
        }
    }
}

pub struct DayClassifier<'a> {
    shift: &'a ShiftConfig,
    rules: &'a RulesConfig,
}

impl<'a> DayClassifier<'a> {
    pub fn new(shift: &'a ShiftConfig, rules: &'a RulesConfig) -> Self {
        DayClassifier { shift, rules }
    }

    /// Returns the manual pick when there is one, otherwise classifies.
    pub fn resolve(&self, date: NaiveDate, events: &[AttendanceEvent], manual: Option<ManualStatus>) -> DayWorkStatus {
        match manual {
            Some(status) => DayWorkStatus::manual(date, status),
            None => self.classify(date, events),
        }
    }

    /// Classifies the events of the shift occurrence starting on `date`.
    pub fn classify(&self, date: NaiveDate, events: &[AttendanceEvent]) -> DayWorkStatus {
        let log = DayLog::new(events.to_vec());
        let status = self.classify_log(date, &log);
        debug!(%date, status = status.status.as_str(), total = status.total_work_time, overtime = status.overtime, "classified day");
        status
    }

    fn classify_log(&self, date: NaiveDate, log: &DayLog) -> DayWorkStatus {
        if log.is_empty() {
            return DayWorkStatus::not_updated(date);
        }

        let missing = log.missing(&[ActionType::GoWork, ActionType::CheckIn, ActionType::CheckOut]);
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(ActionType::as_str).collect();
            return DayWorkStatus::without_hours(
                date,
                DayStatus::Incomplete,
                Message::RemarkMissing(names.join(", ")).to_string(),
            );
        }

        let window = ShiftWindow::anchor(self.shift, date);

        if self.is_quick_cycle(log) {
            let hours = split_within(window.start, window.end, &window);
            let awarded = hours.is_overtime_awarded(self.rules.overtime_threshold());
            return DayWorkStatus::with_hours(
                date,
                DayStatus::FullAttendance,
                &hours,
                awarded,
                Message::RemarkQuickCycle.to_string(),
            );
        }

        // Both are present, checked above.
        let (Some(check_in), Some(mut check_out)) = (log.latest(ActionType::CheckIn), log.latest(ActionType::CheckOut))
        else {
            return DayWorkStatus::not_updated(date);
        };
        if check_out < check_in && self.shift.is_overnight() {
            check_out += Duration::days(1);
        }

        let grace = self.rules.grace();
        let lateness = check_in - window.start;
        let earliness = window.office_end - check_out;
        let is_late = lateness > grace;
        let is_early = earliness > grace;

        let hours = split_within(check_in, check_out, &window);
        let is_overtime = hours.is_overtime_awarded(self.rules.overtime_threshold());

        let status = match (is_late, is_early, is_overtime) {
            (true, true, _) => DayStatus::LateAndEarly,
            (true, false, _) => DayStatus::LateArrival,
            (false, true, _) => DayStatus::EarlyDeparture,
            (false, false, true) => DayStatus::Overtime,
            (false, false, false) => DayStatus::FullAttendance,
        };

        let mut remarks = Vec::new();
        if is_late {
            remarks.push(Message::RemarkLate(lateness.num_minutes()).to_string());
        }
        if is_early {
            remarks.push(Message::RemarkEarly(earliness.num_minutes()).to_string());
        }
        if is_overtime {
            remarks.push(Message::RemarkOvertime(hours.overtime_hours()).to_string());
        }
        if remarks.is_empty() {
            remarks.push(Message::RemarkOnTime.to_string());
        }

        DayWorkStatus::with_hours(date, status, &hours, is_overtime, remarks.join(" & "))
    }

    /// The whole day, first to last event, fits in the quick-cycle limit
    /// and ends with `complete`.
    fn is_quick_cycle(&self, log: &DayLog) -> bool {
        let events = log.events();
        match (events.first(), events.last()) {
            (Some(first), Some(last)) if log.has(ActionType::Complete) => {
                last.timestamp - first.timestamp < self.rules.quick_cycle()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::{ShiftTime, Weekdays};
    use chrono::{FixedOffset, NaiveDateTime, TimeZone};

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

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn dt(day_offset: i64, h: u32, m: u32) -> NaiveDateTime {
        (date() + Duration::days(day_offset)).and_hms_opt(h, m, 0).unwrap()
    }

    fn event(action: ActionType, at: NaiveDateTime) -> AttendanceEvent {
        let tz = FixedOffset::east_opt(7 * 3600).unwrap();
        AttendanceEvent::new(action, tz.from_local_datetime(&at).unwrap())
    }

    fn day(go_work: (u32, u32), check_in: (u32, u32), check_out: (u32, u32), complete: (u32, u32)) -> Vec<AttendanceEvent> {
        vec![
            event(ActionType::GoWork, dt(0, go_work.0, go_work.1)),
            event(ActionType::CheckIn, dt(0, check_in.0, check_in.1)),
            event(ActionType::CheckOut, dt(0, check_out.0, check_out.1)),
            event(ActionType::Complete, dt(0, complete.0, complete.1)),
        ]
    }

    fn classify(shift: &ShiftConfig, events: &[AttendanceEvent]) -> DayWorkStatus {
        let rules = RulesConfig::default();
        DayClassifier::new(shift, &rules).classify(date(), events)
    }

    #[test]
    fn test_no_events_is_not_updated() {
        let status = classify(&shift("08:00", "17:00", "17:00"), &[]);
        assert_eq!(status.status, DayStatus::NotUpdated);
        assert_eq!(status.total_work_time, 0.0);
    }

    #[test]
    fn test_bare_complete_is_incomplete() {
        let events = vec![event(ActionType::Complete, dt(0, 17, 0))];
        let status = classify(&shift("08:00", "17:00", "17:00"), &events);
        assert_eq!(status.status, DayStatus::Incomplete);
        assert!(status.remarks.contains("go_work, check_in, check_out"), "{}", status.remarks);
    }

    #[test]
    fn test_quick_cycle_credits_nominal_shift() {
        let events = day((9, 0), (9, 1), (9, 2), (9, 3));
        let status = classify(&shift("09:00", "17:00", "17:00"), &events);
        assert_eq!(status.status, DayStatus::FullAttendance);
        assert_eq!(status.total_work_time, 8.0);
        assert_eq!(status.overtime, 0.0);
    }

    #[test]
    fn test_quick_cycle_with_overtime_span() {
        let events = day((9, 0), (9, 1), (9, 2), (9, 3));
        let status = classify(&shift("09:00", "17:00", "18:00"), &events);
        assert_eq!(status.status, DayStatus::FullAttendance);
        assert_eq!(status.total_work_time, 9.0);
        assert_eq!(status.overtime, 1.0);
    }

    #[test]
    fn test_quick_cycle_spans_offset_change() {
        let winter = FixedOffset::east_opt(3600).unwrap();
        let summer = FixedOffset::east_opt(2 * 3600).unwrap();
        let events = vec![
            AttendanceEvent::new(ActionType::GoWork, winter.from_local_datetime(&dt(0, 1, 58)).unwrap()),
            AttendanceEvent::new(ActionType::CheckIn, winter.from_local_datetime(&dt(0, 1, 59)).unwrap()),
            AttendanceEvent::new(ActionType::CheckOut, summer.from_local_datetime(&dt(0, 3, 0)).unwrap()),
            AttendanceEvent::new(ActionType::Complete, summer.from_local_datetime(&dt(0, 3, 0)).unwrap()),
        ];
        let status = classify(&shift("09:00", "17:00", "17:00"), &events);
        assert_eq!(status.status, DayStatus::FullAttendance);
        assert_eq!(status.total_work_time, 8.0);
        assert_eq!(status.regular_hours, 8.0);
    }

    #[test]
    fn test_late_arrival_reports_minutes() {
        let events = day((7, 50), (8, 20), (17, 0), (17, 5));
        let status = classify(&shift("08:00", "17:00", "17:00"), &events);
        assert_eq!(status.status, DayStatus::LateArrival);
        assert!(status.remarks.contains("20 min"), "{}", status.remarks);
        assert_eq!(status.total_work_time, 8.67);
    }

    #[test]
    fn test_grace_period_forgives_small_deviations() {
        let events = day((7, 40), (8, 5), (16, 55), (17, 0));
        let status = classify(&shift("08:00", "17:00", "17:00"), &events);
        assert_eq!(status.status, DayStatus::FullAttendance);
    }

    #[test]
    fn test_early_departure_and_late_and_early() {
        let s = shift("08:00", "17:00", "17:00");
        let early = classify(&s, &day((7, 40), (8, 0), (16, 0), (16, 5)));
        assert_eq!(early.status, DayStatus::EarlyDeparture);
        assert!(early.remarks.contains("60 min"));

        let both = classify(&s, &day((7, 40), (8, 30), (16, 30), (16, 35)));
        assert_eq!(both.status, DayStatus::LateAndEarly);
        assert!(both.remarks.contains(" & "));
    }

    #[test]
    fn test_overtime_awarded_from_threshold() {
        let s = shift("08:00", "17:00", "20:00");
        let overtime = classify(&s, &day((7, 40), (8, 0), (18, 30), (18, 35)));
        assert_eq!(overtime.status, DayStatus::Overtime);
        assert_eq!(overtime.overtime, 1.5);
        assert_eq!(overtime.total_work_time, 10.5);
        assert_eq!(overtime.regular_hours, 9.0);

        let short = classify(&s, &day((7, 40), (8, 0), (17, 20), (17, 25)));
        assert_eq!(short.status, DayStatus::FullAttendance);
        assert_eq!(short.overtime, 0.0);
        assert_eq!(short.total_work_time, 9.33);
        assert_eq!(short.regular_hours, 9.0);
    }

    #[test]
    fn test_late_with_overtime_keeps_late_status_and_both_remarks() {
        let s = shift("08:00", "17:00", "20:00");
        let status = classify(&s, &day((7, 50), (8, 30), (19, 0), (19, 5)));
        assert_eq!(status.status, DayStatus::LateArrival);
        assert!(status.remarks.contains("30 min"));
        assert!(status.remarks.contains("OT"));
    }

    #[test]
    fn test_overnight_shift_classification() {
        let night = shift("22:00", "06:00", "06:00");
        let events = vec![
            event(ActionType::GoWork, dt(0, 21, 20)),
            event(ActionType::CheckIn, dt(0, 21, 55)),
            event(ActionType::CheckOut, dt(1, 6, 2)),
            event(ActionType::Complete, dt(1, 6, 5)),
        ];
        let status = classify(&night, &events);
        assert_eq!(status.status, DayStatus::FullAttendance);
        assert_eq!(status.total_work_time, 8.0);
    }

    #[test]
    fn test_manual_override_short_circuits() {
        let s = shift("08:00", "17:00", "17:00");
        let rules = RulesConfig::default();
        let events = day((7, 50), (8, 20), (17, 0), (17, 5));
        let status = DayClassifier::new(&s, &rules).resolve(date(), &events, Some(ManualStatus::Sick));
        assert_eq!(status.status, DayStatus::Sick);
        assert!(status.manual);
        assert!(status.status.is_manual());
    }

    #[test]
    fn test_status_codes_round_trip() {
        for status in DayStatus::ALL {
            assert_eq!(status.as_str().parse::<DayStatus>().unwrap(), status);
        }
    }
}
