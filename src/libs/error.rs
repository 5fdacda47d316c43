//! Error taxonomy for the shift and attendance engine.
//!
//! Only hard failures live here: unparseable shift times, shift or note
//! definitions that break their invariants, and a check-out that does not
//! come after its check-in. Advisory outcomes such as a blocked punch or a
//! punch outside the tolerance window are returned as plain values by
//! [`crate::libs::gate`] and [`crate::libs::window`] so that the caller can
//! offer an override.

use chrono::NaiveDateTime;
use thiserror::Error;

/// A broken [`crate::libs::shift::ShiftConfig`] invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShiftViolation {
    #[error("shift name must not be empty")]
    EmptyName,
    #[error("shift name is longer than {max} characters")]
    NameTooLong { max: usize },
    #[error("shift name contains unsupported character '{0}'")]
    InvalidNameCharacter(char),
    #[error("departure must be at least {min} minutes before start (got {actual})")]
    DepartureTooClose { min: i64, actual: i64 },
    #[error("office hours must span at least {min} minutes (got {actual})")]
    OfficeSpanTooShort { min: i64, actual: i64 },
    #[error("end time must not be before office end time")]
    EndBeforeOfficeEnd,
    #[error("overtime span after office end must be at least {min} minutes (got {actual})")]
    OvertimeSpanTooShort { min: i64, actual: i64 },
    #[error("at least one weekday must be selected")]
    NoWeekdays,
}

/// A broken [`crate::libs::note::Note`] invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteViolation {
    #[error("note title must not be empty")]
    EmptyTitle,
    #[error("note title is longer than {max} characters")]
    TitleTooLong { max: usize },
    #[error("note content must not be empty")]
    EmptyContent,
    #[error("note content is longer than {max} characters")]
    ContentTooLong { max: usize },
    #[error("note needs an associated shift or at least one reminder day")]
    NoSchedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid shift time '{0}': expected HH:MM with hour 0-23 and minute 0-59")]
    InvalidShiftTime(String),

    #[error("Invalid shift configuration: {0}")]
    InvalidShiftConfig(#[from] ShiftViolation),

    #[error("Check-out at {check_out} must be after check-in at {check_in}")]
    CheckOutBeforeCheckIn {
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    },

    #[error("No shift is available for this operation")]
    MissingShift,

    #[error("Invalid note: {0}")]
    InvalidNote(#[from] NoteViolation),

    #[error("A shift named '{0}' already exists")]
    DuplicateShiftName(String),

    #[error("A note with the same title and content already exists")]
    DuplicateNote,
}
