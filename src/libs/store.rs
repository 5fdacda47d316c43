//! Persistence contract between the engine and its host.
//!
//! The engine itself never touches storage. Hosts implement
//! [`AttendanceStore`]; this crate ships a SQLite implementation
//! ([`crate::db::store::Store`]) and an in-memory one
//! ([`crate::db::memory::MemoryStore`]).
//!
//! Events are keyed by the shift day they belong to, which for overnight
//! shifts is not always the calendar day of the timestamp.

use crate::libs::attendance::AttendanceEvent;
use crate::libs::note::Note;
use crate::libs::shift::ShiftConfig;
use crate::libs::status::DayWorkStatus;
use anyhow::Result;
use chrono::NaiveDate;

pub trait AttendanceStore {
    // Shifts

    fn load_shift_config(&mut self, id: i64) -> Result<Option<ShiftConfig>>;

    fn load_shifts(&mut self) -> Result<Vec<ShiftConfig>>;

    /// Inserts a new shift (when `id` is `None`) or updates an existing one.
    /// Returns the shift id. Names are unique, case-insensitively.
    fn save_shift(&mut self, shift: &ShiftConfig) -> Result<i64>;

    fn delete_shift(&mut self, id: i64) -> Result<bool>;

    // Attendance events

    fn load_events_for_date(&mut self, date: NaiveDate) -> Result<Vec<AttendanceEvent>>;

    fn append_event(&mut self, date: NaiveDate, event: &AttendanceEvent) -> Result<i64>;

    /// Removes every event of `date` together with its stored status.
    fn clear_events_for_date(&mut self, date: NaiveDate) -> Result<usize>;

    // Day statuses

    fn load_day_status(&mut self, date: NaiveDate) -> Result<Option<DayWorkStatus>>;

    fn save_day_status(&mut self, status: &DayWorkStatus) -> Result<()>;

    /// Stored statuses with `from <= date <= to`, ordered by date.
    fn load_statuses_in_range(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DayWorkStatus>>;

    // Notes

    fn load_notes(&mut self) -> Result<Vec<Note>>;

    /// Inserts a note. A note with the same title and content is rejected.
    fn save_note(&mut self, note: &Note) -> Result<i64>;

    fn delete_note(&mut self, id: i64) -> Result<bool>;
}
