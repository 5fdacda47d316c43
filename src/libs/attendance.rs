//! Attendance events and the per-day action sequence.
//!
//! A day's punches always follow `go_work → check_in → check_out → complete`.
//! Events are appended to the store as they happen; [`DayLog`] sorts them
//! once and answers the questions the gate and the classifier need
//! ("when was the latest check-in?", "what comes next?") without re-scanning
//! ad hoc in several places.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    GoWork,
    CheckIn,
    CheckOut,
    Complete,
}

impl ActionType {
    pub const SEQUENCE: [ActionType; 4] = [
        ActionType::GoWork,
        ActionType::CheckIn,
        ActionType::CheckOut,
        ActionType::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::GoWork => "go_work",
            ActionType::CheckIn => "check_in",
            ActionType::CheckOut => "check_out",
            ActionType::Complete => "complete",
        }
    }

    /// The action that must precede this one, if any.
    pub fn predecessor(&self) -> Option<ActionType> {
        match self {
            ActionType::GoWork => None,
            ActionType::CheckIn => Some(ActionType::GoWork),
            ActionType::CheckOut => Some(ActionType::CheckIn),
            ActionType::Complete => Some(ActionType::CheckOut),
        }
    }

    pub fn successor(&self) -> Option<ActionType> {
        match self {
            ActionType::GoWork => Some(ActionType::CheckIn),
            ActionType::CheckIn => Some(ActionType::CheckOut),
            ActionType::CheckOut => Some(ActionType::Complete),
            ActionType::Complete => None,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::SEQUENCE
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("Unknown action type '{}'", s))
    }
}

/// One logged punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub id: Option<i64>,
    pub action: ActionType,
    pub timestamp: DateTime<FixedOffset>,
}

impl AttendanceEvent {
    pub fn new(action: ActionType, timestamp: DateTime<FixedOffset>) -> Self {
        AttendanceEvent {
            id: None,
            action,
            timestamp,
        }
    }

    /// Wall-clock time at the place the punch was made.
    pub fn local(&self) -> NaiveDateTime {
        self.timestamp.naive_local()
    }

    pub fn local_date(&self) -> NaiveDate {
        self.local().date()
    }
}

/// Where a day currently stands in the action sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    NotStarted,
    GoneToWork { at: NaiveDateTime },
    CheckedIn { at: NaiveDateTime },
    CheckedOut { at: NaiveDateTime },
    Completed { at: NaiveDateTime },
}

impl DayState {
    /// The most advanced action logged so far, with its time.
    pub fn last_action(&self) -> Option<(ActionType, NaiveDateTime)> {
        match *self {
            DayState::NotStarted => None,
            DayState::GoneToWork { at } => Some((ActionType::GoWork, at)),
            DayState::CheckedIn { at } => Some((ActionType::CheckIn, at)),
            DayState::CheckedOut { at } => Some((ActionType::CheckOut, at)),
            DayState::Completed { at } => Some((ActionType::Complete, at)),
        }
    }

    /// The only action the sequence accepts next; `None` once completed.
    pub fn next_action(&self) -> Option<ActionType> {
        match self.last_action() {
            None => Some(ActionType::GoWork),
            Some((action, _)) => action.successor(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DayState::Completed { .. })
    }
}

/// A day's events sorted by time.
#[derive(Debug, Clone, Default)]
pub struct DayLog {
    events: Vec<AttendanceEvent>,
}

impl DayLog {
    pub fn new(mut events: Vec<AttendanceEvent>) -> Self {
        events.sort_by_key(|event| event.timestamp);
        DayLog { events }
    }

    pub fn events(&self) -> &[AttendanceEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn has(&self, action: ActionType) -> bool {
        self.events.iter().any(|event| event.action == action)
    }

    /// Local time of the latest event of `action`.
    pub fn latest(&self, action: ActionType) -> Option<NaiveDateTime> {
        self.events.iter().rev().find(|event| event.action == action).map(AttendanceEvent::local)
    }

    /// Offset-aware timestamp of the latest event of `action`.
    pub fn latest_instant(&self, action: ActionType) -> Option<DateTime<FixedOffset>> {
        self.events
            .iter()
            .rev()
            .find(|event| event.action == action)
            .map(|event| event.timestamp)
    }

    pub fn missing(&self, required: &[ActionType]) -> Vec<ActionType> {
        required.iter().copied().filter(|action| !self.has(*action)).collect()
    }

    /// Derives the sequence position from the most advanced action present.
    pub fn state(&self) -> DayState {
        let furthest = ActionType::SEQUENCE
            .iter()
            .rev()
            .find_map(|action| self.latest(*action).map(|at| (*action, at)));

        match furthest {
            None => DayState::NotStarted,
            Some((ActionType::GoWork, at)) => DayState::GoneToWork { at },
            Some((ActionType::CheckIn, at)) => DayState::CheckedIn { at },
            Some((ActionType::CheckOut, at)) => DayState::CheckedOut { at },
            Some((ActionType::Complete, at)) => DayState::Completed { at },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(action: ActionType, h: u32, m: u32) -> AttendanceEvent {
        let tz = FixedOffset::east_opt(7 * 3600).unwrap();
        AttendanceEvent::new(action, tz.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap())
    }

    #[test]
    fn test_action_type_string_forms() {
        for action in ActionType::SEQUENCE {
            assert_eq!(action.as_str().parse::<ActionType>().unwrap(), action);
        }
        assert!("lunch".parse::<ActionType>().is_err());
        assert_eq!(serde_json::to_string(&ActionType::GoWork).unwrap(), "\"go_work\"");
    }

    #[test]
    fn test_state_follows_furthest_action() {
        let log = DayLog::new(vec![]);
        assert_eq!(log.state(), DayState::NotStarted);
        assert_eq!(log.state().next_action(), Some(ActionType::GoWork));

        let log = DayLog::new(vec![event(ActionType::CheckIn, 8, 1), event(ActionType::GoWork, 7, 40)]);
        let state = log.state();
        assert!(matches!(state, DayState::CheckedIn { .. }));
        assert_eq!(state.next_action(), Some(ActionType::CheckOut));
        assert_eq!(log.events()[0].action, ActionType::GoWork);
    }

    #[test]
    fn test_completed_day_is_terminal() {
        let log = DayLog::new(vec![
            event(ActionType::GoWork, 7, 40),
            event(ActionType::CheckIn, 8, 0),
            event(ActionType::CheckOut, 17, 0),
            event(ActionType::Complete, 17, 5),
        ]);
        assert!(log.state().is_completed());
        assert_eq!(log.state().next_action(), None);
        assert!(log.missing(&[ActionType::GoWork, ActionType::CheckIn]).is_empty());
    }

    #[test]
    fn test_local_time_uses_event_offset() {
        let e = event(ActionType::GoWork, 7, 40);
        assert_eq!(e.local().format("%H:%M").to_string(), "07:40");
        assert_eq!(e.local_date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }
}
