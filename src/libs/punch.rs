//! Punch workflow: the host-side glue around the engine.
//!
//! A punch resolves the shift day it belongs to, asks the [`ActionGate`],
//! validates the check-in/out window, appends the event and re-classifies
//! the day. Window deviations and timing blocks are advisory; the caller
//! decides whether to force past them. Sequence blocks are final.

use crate::libs::attendance::{ActionType, AttendanceEvent, DayLog};
use crate::libs::config::RulesConfig;
use crate::libs::gate::{ActionGate, GateDecision};
use crate::libs::shift::ShiftConfig;
use crate::libs::status::{DayClassifier, DayWorkStatus, ManualStatus};
use crate::libs::store::AttendanceStore;
use crate::libs::time_window::shift_day;
use crate::libs::window::{validate_check_in, validate_check_out, WindowCheck};
use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::{debug, info};

/// What would happen if the punch were recorded now.
#[derive(Debug, Clone, PartialEq)]
pub struct PunchPreview {
    pub shift_date: NaiveDate,
    pub gate: GateDecision,
    /// Present for check-in and check-out.
    pub window: Option<WindowCheck>,
}

impl PunchPreview {
    /// The punch can be recorded without overriding anything.
    pub fn is_clean(&self) -> bool {
        self.gate.allowed && self.window.as_ref().map_or(true, |check| check.is_valid)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PunchOutcome {
    Recorded {
        event: AttendanceEvent,
        preview: PunchPreview,
        /// A timing block was overridden.
        forced: bool,
        status: DayWorkStatus,
    },
    Blocked(PunchPreview),
}

pub struct Punch<'a> {
    rules: &'a RulesConfig,
}

impl<'a> Punch<'a> {
    pub fn new(rules: &'a RulesConfig) -> Self {
        Punch { rules }
    }

    /// Evaluates the gate and the window for `action` at `now` without
    /// writing anything.
    ///
    /// # Errors
    ///
    /// Fails on store errors, or when a check-out is not after the day's
    /// check-in.
    pub fn preview<S: AttendanceStore>(
        &self,
        store: &mut S,
        shift: &ShiftConfig,
        action: ActionType,
        now: DateTime<FixedOffset>,
    ) -> Result<PunchPreview> {
        let local = now.naive_local();
        let shift_date = shift_day(shift, local);
        let log = DayLog::new(store.load_events_for_date(shift_date)?);

        let gate = ActionGate::new(self.rules).evaluate(&log, action, now);
        let tolerance = self.rules.window_tolerance();
        let window = match (action, gate.reason) {
            (_, Some(reason)) if !reason.is_forcible() => None,
            (ActionType::CheckIn, _) => Some(validate_check_in(local, shift, tolerance)),
            (ActionType::CheckOut, _) => match log.latest(ActionType::CheckIn) {
                Some(check_in) => Some(validate_check_out(local, check_in, shift, tolerance)?),
                None => None,
            },
            _ => None,
        };

        Ok(PunchPreview { shift_date, gate, window })
    }

    /// Records `action` at `now` unless the gate blocks it. `force`
    /// overrides timing blocks only.
    pub fn perform<S: AttendanceStore>(
        &self,
        store: &mut S,
        shift: &ShiftConfig,
        action: ActionType,
        now: DateTime<FixedOffset>,
        force: bool,
    ) -> Result<PunchOutcome> {
        let preview = self.preview(store, shift, action, now)?;

        let forced = !preview.gate.allowed;
        if forced && !(force && preview.gate.is_forcible()) {
            debug!(action = %action, reason = ?preview.gate.reason, "punch blocked");
            return Ok(PunchOutcome::Blocked(preview));
        }

        let mut event = AttendanceEvent::new(action, now);
        event.id = Some(store.append_event(preview.shift_date, &event)?);
        info!(action = %action, date = %preview.shift_date, forced, "punch recorded");

        let status = self.refresh(store, shift, preview.shift_date)?;

        Ok(PunchOutcome::Recorded {
            event,
            preview,
            forced,
            status,
        })
    }

    /// Re-classifies `date` from its stored events and saves the result.
    /// A manual status is returned untouched.
    pub fn refresh<S: AttendanceStore>(&self, store: &mut S, shift: &ShiftConfig, date: NaiveDate) -> Result<DayWorkStatus> {
        if let Some(existing) = store.load_day_status(date)? {
            if existing.manual {
                return Ok(existing);
            }
        }

        let events = store.load_events_for_date(date)?;
        let status = DayClassifier::new(shift, self.rules).classify(date, &events);
        store.save_day_status(&status)?;
        Ok(status)
    }

    /// Removes all punches of `date` and its status.
    pub fn reset<S: AttendanceStore>(store: &mut S, date: NaiveDate) -> Result<usize> {
        let removed = store.clear_events_for_date(date)?;
        info!(%date, removed, "day reset");
        Ok(removed)
    }

    /// Overrides the status of `date` with a manual pick.
    pub fn set_manual<S: AttendanceStore>(store: &mut S, date: NaiveDate, status: ManualStatus) -> Result<DayWorkStatus> {
        let status = DayWorkStatus::manual(date, status);
        store.save_day_status(&status)?;
        Ok(status)
    }
}
