//! Action gate: decides whether the next punch may be recorded now.
//!
//! Two timing rules guard against accidental double taps:
//!
//! | Transition              | Minimum gap | Wait reported in |
//! |-------------------------|-------------|------------------|
//! | `go_work → check_in`    | 5 minutes   | seconds          |
//! | `check_in → check_out`  | 120 minutes | minutes          |
//!
//! Every other transition, and the very first action of a day, passes
//! immediately. The gate never fails: it returns a [`GateDecision`] that the
//! caller can present, and timing blocks may be overridden by the caller.
//!
//! `now` is expected to be at or after the previous action's timestamp.
//! Elapsed time is measured between offset-aware instants, so a UTC offset
//! change between two punches does not stretch or shrink the gap.

use crate::libs::attendance::{ActionType, DayLog};
use crate::libs::config::RulesConfig;
use chrono::{DateTime, Duration, FixedOffset};
use std::fmt;
use tracing::debug;

/// Machine-readable reason a punch was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateReason {
    /// `check_in` came too soon after `go_work`.
    TooSoonAfterGoWork,
    /// `check_out` came too soon after `check_in`.
    TooSoonAfterCheckIn,
    /// The action is not the next one in the day's sequence.
    OutOfSequence { expected: ActionType },
    /// `complete` was already logged for the day.
    DayCompleted,
}

impl GateReason {
    pub fn code(&self) -> &'static str {
        match self {
            GateReason::TooSoonAfterGoWork => "go_work_gap",
            GateReason::TooSoonAfterCheckIn => "check_in_gap",
            GateReason::OutOfSequence { .. } => "out_of_sequence",
            GateReason::DayCompleted => "day_completed",
        }
    }

    /// Timing rules can be forced past; sequence rules cannot.
    pub fn is_forcible(&self) -> bool {
        matches!(self, GateReason::TooSoonAfterGoWork | GateReason::TooSoonAfterCheckIn)
    }
}

/// Remaining wait before a blocked action becomes allowed, rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitAmount {
    Seconds(i64),
    Minutes(i64),
}

impl fmt::Display for WaitAmount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WaitAmount::Seconds(s) => write!(f, "{} second{}", s, if *s == 1 { "" } else { "s" }),
            WaitAmount::Minutes(m) => write!(f, "{} minute{}", m, if *m == 1 { "" } else { "s" }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub allowed: bool,
    pub reason: Option<GateReason>,
    pub wait: Option<WaitAmount>,
}

impl GateDecision {
    pub fn allow() -> Self {
        GateDecision {
            allowed: true,
            reason: None,
            wait: None,
        }
    }

    pub fn block(reason: GateReason, wait: Option<WaitAmount>) -> Self {
        GateDecision {
            allowed: false,
            reason: Some(reason),
            wait,
        }
    }

    pub fn is_forcible(&self) -> bool {
        self.reason.map_or(true, |reason| reason.is_forcible())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActionGate {
    go_work_gap: Duration,
    check_in_gap: Duration,
}

impl Default for ActionGate {
    fn default() -> Self {
        Self::new(&RulesConfig::default())
    }
}

impl ActionGate {
    pub fn new(rules: &RulesConfig) -> Self {
        ActionGate {
            go_work_gap: rules.go_work_gap(),
            check_in_gap: rules.check_in_gap(),
        }
    }

    /// Applies the timing rules to a single transition.
    ///
    /// `previous` is the latest logged action and its time, or `None` when
    /// nothing relevant was logged yet.
    pub fn can_perform(
        &self,
        previous: Option<(ActionType, DateTime<FixedOffset>)>,
        proposed: ActionType,
        now: DateTime<FixedOffset>,
    ) -> GateDecision {
        let Some((previous_type, previous_at)) = previous else {
            return GateDecision::allow();
        };
        let elapsed_ms = (now - previous_at).num_milliseconds();

        let decision = match (previous_type, proposed) {
            (ActionType::GoWork, ActionType::CheckIn) => {
                let remaining_ms = self.go_work_gap.num_milliseconds() - elapsed_ms;
                if remaining_ms > 0 {
                    GateDecision::block(
                        GateReason::TooSoonAfterGoWork,
                        Some(WaitAmount::Seconds(ceil_div(remaining_ms, 1_000))),
                    )
                } else {
                    GateDecision::allow()
                }
            }
            (ActionType::CheckIn, ActionType::CheckOut) => {
                let remaining_ms = self.check_in_gap.num_milliseconds() - elapsed_ms;
                if remaining_ms > 0 {
                    GateDecision::block(
                        GateReason::TooSoonAfterCheckIn,
                        Some(WaitAmount::Minutes(ceil_div(remaining_ms, 60_000))),
                    )
                } else {
                    GateDecision::allow()
                }
            }
            _ => GateDecision::allow(),
        };

        debug!(
            previous = %previous_type,
            proposed = %proposed,
            elapsed_ms,
            allowed = decision.allowed,
            "action gate decision"
        );
        decision
    }

    /// Checks the day's sequence position, then the timing rule against the
    /// latest event of the proposed action's predecessor.
    pub fn evaluate(&self, log: &DayLog, proposed: ActionType, now: DateTime<FixedOffset>) -> GateDecision {
        let state = log.state();
        if state.is_completed() {
            return GateDecision::block(GateReason::DayCompleted, None);
        }
        match state.next_action() {
            Some(expected) if expected != proposed => {
                return GateDecision::block(GateReason::OutOfSequence { expected }, None);
            }
            _ => {}
        }

        let previous = proposed
            .predecessor()
            .and_then(|predecessor| log.latest_instant(predecessor).map(|at| (predecessor, at)));
        self.can_perform(previous, proposed, now)
    }
}

fn ceil_div(value: i64, unit: i64) -> i64 {
    (value + unit - 1) / unit
}
