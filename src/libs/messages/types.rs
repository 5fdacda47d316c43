//! Message type definitions for shiftclock.
//!
//! Every piece of user-facing text is a variant of [`Message`]; the text
//! itself lives in the `Display` implementation next door. Variants are
//! grouped by the area of the application that produces them.

use crate::libs::attendance::ActionType;
use crate::libs::gate::WaitAmount;
use crate::libs::window::PunchKind;

#[derive(Debug, Clone)]
pub enum Message {
    // === SHIFT MESSAGES ===
    ShiftCreated(String),
    ShiftDeleted(String),
    ShiftActivated(String),
    ShiftNotFound(i64),
    ShiftsHeader,
    NoShiftsFound,
    NoActiveShift,
    ActiveShiftMissing(i64),
    ConfirmDeleteShift(String),

    // === PUNCH MESSAGES ===
    PunchRecorded { action: ActionType, at: String },
    PunchWaitRequired { action: ActionType, wait: Option<WaitAmount> },
    PunchOutOfSequence { expected: ActionType },
    PunchDayCompleted,
    PunchForced,
    PunchTooEarly { kind: PunchKind, minutes: i64, boundary: String },
    PunchTooLate { kind: PunchKind, minutes: i64, boundary: String },
    ConfirmProceedAnyway,
    DayStatusUpdated { status: String, hours: String },

    // === STATUS MESSAGES ===
    StatusHeader(String),
    StatusNotStored(String),
    ManualStatusSet { date: String, status: String },
    DayReset(String),
    ConfirmResetDay(String),

    // === REMARKS ===
    RemarkNoEvents,
    RemarkManual(String),
    RemarkMissing(String),
    RemarkQuickCycle,
    RemarkLate(i64),
    RemarkEarly(i64),
    RemarkOvertime(f64),
    RemarkOnTime,

    // === SUMMARY MESSAGES ===
    SummaryHeader { from: String, to: String },
    SummaryTotals { total: String, regular: String, overtime: String },

    // === NOTE MESSAGES ===
    NoteCreated(String),
    NoteDeleted(String),
    NoteNotFound(i64),
    NotesHeader,
    NoNotesFound,
    ConfirmDeleteNote(String),

    // === REMINDER MESSAGES ===
    RemindersHeader(String),
    NoRemindersForDate(String),
    ReminderDeparture,
    ReminderBeforeStart,
    ReminderAfterEnd,
    ReminderNote(String),

    // === CONFIG MESSAGES ===
    ConfigSaved,

    // === PROMPTS ===
    PromptGoWorkGap,
    PromptCheckInGap,
    PromptWindowTolerance,
    PromptGraceMinutes,
    PromptOvertimeThreshold,
    PromptQuickCycle,
    PromptShiftName,
    PromptDepartureTime,
    PromptStartTime,
    PromptOfficeEndTime,
    PromptEndTime,
    PromptShiftDays,
    PromptNoteTitle,
    PromptNoteContent,
    PromptNoteReminderTime,
    PromptNoteDays,

    // === GENERAL ===
    OperationCancelled,
    InvalidDate(String),
    InvalidTime(String),

    // === DATABASE MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}
