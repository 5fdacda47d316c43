//! Display implementation for shiftclock messages.
//!
//! All user-facing text is defined here, in one match, so wording stays
//! consistent across commands. Parameters are interpolated with plain
//! `format!` calls.

use super::types::Message;
use crate::libs::window::PunchKind;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SHIFT MESSAGES ===
            Message::ShiftCreated(name) => format!("Shift '{}' saved", name),
            Message::ShiftDeleted(name) => format!("Shift '{}' deleted", name),
            Message::ShiftActivated(name) => format!("Punches are now recorded against shift '{}'", name),
            Message::ShiftNotFound(id) => format!("Shift with ID {} not found", id),
            Message::ShiftsHeader => "Configured shifts:".to_string(),
            Message::NoShiftsFound => "No shifts configured yet. Add one with 'shiftclock shift add'.".to_string(),
            Message::NoActiveShift => "No active shift. Select one with 'shiftclock shift activate <ID>'.".to_string(),
            Message::ActiveShiftMissing(id) => format!("Active shift {} no longer exists. Activate another shift.", id),
            Message::ConfirmDeleteShift(name) => format!("Delete shift '{}'?", name),

            // === PUNCH MESSAGES ===
            Message::PunchRecorded { action, at } => format!("'{}' recorded at {}", action, at),
            Message::PunchWaitRequired { action, wait } => match wait {
                Some(wait) => format!("Too soon for '{}'. Please wait {} more.", action, wait),
                None => format!("Too soon for '{}'.", action),
            },
            Message::PunchOutOfSequence { expected } => {
                format!("Action not allowed now. The next expected action is '{}'.", expected)
            }
            Message::PunchDayCompleted => "The day is already completed. Reset it to punch again.".to_string(),
            Message::PunchForced => "Timing rule overridden, recording anyway".to_string(),
            Message::PunchTooEarly { kind, minutes, boundary } => format!(
                "{} is {} minutes early, the window opens at {}",
                punch_kind_label(kind),
                minutes,
                boundary
            ),
            Message::PunchTooLate { kind, minutes, boundary } => format!(
                "{} is {} minutes late, the window closed at {}",
                punch_kind_label(kind),
                minutes,
                boundary
            ),
            Message::ConfirmProceedAnyway => "Proceed anyway?".to_string(),
            Message::DayStatusUpdated { status, hours } => format!("Day status: {} ({} h)", status, hours),

            // === STATUS MESSAGES ===
            Message::StatusHeader(date) => format!("Attendance for {}", date),
            Message::StatusNotStored(date) => format!("No attendance recorded for {}", date),
            Message::ManualStatusSet { date, status } => format!("{} marked as {}", date, status),
            Message::DayReset(date) => format!("Attendance for {} has been reset", date),
            Message::ConfirmResetDay(date) => format!("Delete all punches and the status for {}?", date),

            // === REMARKS ===
            Message::RemarkNoEvents => "No attendance recorded".to_string(),
            Message::RemarkManual(label) => format!("Marked as {}", label),
            Message::RemarkMissing(actions) => format!("Missing: {}", actions),
            Message::RemarkQuickCycle => "Quick check-in/out".to_string(),
            Message::RemarkLate(minutes) => format!("Late by {} min", minutes),
            Message::RemarkEarly(minutes) => format!("Left {} min early", minutes),
            Message::RemarkOvertime(hours) => format!("OT {:.2}h", hours),
            Message::RemarkOnTime => "On time".to_string(),

            // === SUMMARY MESSAGES ===
            Message::SummaryHeader { from, to } => format!("Working hours from {} to {}", from, to),
            Message::SummaryTotals {
                total,
                regular,
                overtime,
            } => format!("Total: {} h (regular {} h, overtime {} h)", total, regular, overtime),

            // === NOTE MESSAGES ===
            Message::NoteCreated(title) => format!("Note '{}' saved", title),
            Message::NoteDeleted(title) => format!("Note '{}' deleted", title),
            Message::NoteNotFound(id) => format!("Note with ID {} not found", id),
            Message::NotesHeader => "Notes:".to_string(),
            Message::NoNotesFound => "No notes found".to_string(),
            Message::ConfirmDeleteNote(title) => format!("Delete note '{}'?", title),

            // === REMINDER MESSAGES ===
            Message::RemindersHeader(date) => format!("Reminders for {}", date),
            Message::NoRemindersForDate(date) => format!("Nothing to remind on {}", date),
            Message::ReminderDeparture => "Time to leave for work".to_string(),
            Message::ReminderBeforeStart => "Shift starts soon, check in".to_string(),
            Message::ReminderAfterEnd => "Shift is over, check out".to_string(),
            Message::ReminderNote(title) => format!("Note: {}", title),

            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),

            // === PROMPTS ===
            Message::PromptGoWorkGap => "Minimum minutes between 'go work' and check-in".to_string(),
            Message::PromptCheckInGap => "Minimum minutes between check-in and check-out".to_string(),
            Message::PromptWindowTolerance => "Check-in/out window tolerance in minutes".to_string(),
            Message::PromptGraceMinutes => "Grace period for late arrival in minutes".to_string(),
            Message::PromptOvertimeThreshold => "Minimum overtime in minutes to be counted".to_string(),
            Message::PromptQuickCycle => "Quick cycle length in minutes".to_string(),
            Message::PromptShiftName => "Shift name".to_string(),
            Message::PromptDepartureTime => "Departure time (HH:MM)".to_string(),
            Message::PromptStartTime => "Start time (HH:MM)".to_string(),
            Message::PromptOfficeEndTime => "Office end time (HH:MM)".to_string(),
            Message::PromptEndTime => "Overtime end time (HH:MM)".to_string(),
            Message::PromptShiftDays => "Days (e.g. Mon,Tue,Wed or workweek)".to_string(),
            Message::PromptNoteTitle => "Note title".to_string(),
            Message::PromptNoteContent => "Note content".to_string(),
            Message::PromptNoteReminderTime => "Reminder time (HH:MM, empty for none)".to_string(),
            Message::PromptNoteDays => "Reminder days (e.g. Mon,Fri, empty for none)".to_string(),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidDate(date) => format!("Invalid date '{}'. Use YYYY-MM-DD or 'today'.", date),
            Message::InvalidTime(time) => format!("Invalid time '{}'. Use HH:MM.", time),

            // === DATABASE MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed".to_string(),
        };
        write!(f, "{}", text)
    }
}

fn punch_kind_label(kind: &PunchKind) -> &'static str {
    match kind {
        PunchKind::CheckIn => "Check-in",
        PunchKind::CheckOut => "Check-out",
    }
}
