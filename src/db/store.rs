use crate::db::db::Db;
use crate::libs::attendance::AttendanceEvent;
use crate::libs::error::EngineError;
use crate::libs::note::Note;
use crate::libs::shift::{ShiftConfig, ShiftTime};
use crate::libs::status::DayWorkStatus;
use crate::libs::store::AttendanceStore;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::str::FromStr;

const SELECT_SHIFT_COLUMNS: &str = "SELECT id, name, departure_time, start_time, office_end_time, end_time,
    remind_before_start, remind_after_end, days_applied, show_sign_button FROM shifts";
const INSERT_SHIFT: &str = "INSERT INTO shifts (name, departure_time, start_time, office_end_time, end_time,
    remind_before_start, remind_after_end, days_applied, show_sign_button)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_SHIFT: &str = "UPDATE shifts SET name = ?2, departure_time = ?3, start_time = ?4, office_end_time = ?5,
    end_time = ?6, remind_before_start = ?7, remind_after_end = ?8, days_applied = ?9, show_sign_button = ?10
    WHERE id = ?1";
const SELECT_SHIFT_NAME_TAKEN: &str = "SELECT COUNT(*) FROM shifts WHERE name = ?1 COLLATE NOCASE AND id IS NOT ?2";
const DELETE_SHIFT: &str = "DELETE FROM shifts WHERE id = ?1";

const SELECT_EVENTS_BY_DATE: &str =
    "SELECT id, action, timestamp FROM attendance_events WHERE shift_date = ?1 ORDER BY timestamp, id";
const INSERT_EVENT: &str = "INSERT INTO attendance_events (shift_date, action, timestamp) VALUES (?1, ?2, ?3)";
const DELETE_EVENTS_BY_DATE: &str = "DELETE FROM attendance_events WHERE shift_date = ?1";

const SELECT_STATUS_COLUMNS: &str =
    "SELECT date, status, total_work_time, overtime, remarks, override_status, regular_hours FROM day_statuses";
const UPSERT_STATUS: &str = "INSERT INTO day_statuses
    (date, status, total_work_time, overtime, remarks, override_status, regular_hours)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT(date) DO UPDATE SET status = excluded.status, total_work_time = excluded.total_work_time,
    overtime = excluded.overtime, remarks = excluded.remarks, override_status = excluded.override_status,
    regular_hours = excluded.regular_hours, updated_at = CURRENT_TIMESTAMP";
const DELETE_STATUS: &str = "DELETE FROM day_statuses WHERE date = ?1";

const SELECT_NOTES: &str = "SELECT id, title, content, reminder_time, explicit_reminder_days FROM notes ORDER BY id";
const SELECT_NOTE_SHIFTS: &str = "SELECT shift_id FROM note_shifts WHERE note_id = ?1 ORDER BY shift_id";
const SELECT_NOTE_TAKEN: &str = "SELECT COUNT(*) FROM notes WHERE title = ?1 AND content = ?2";
const INSERT_NOTE: &str =
    "INSERT INTO notes (title, content, reminder_time, explicit_reminder_days) VALUES (?1, ?2, ?3, ?4)";
const INSERT_NOTE_SHIFT: &str = "INSERT OR IGNORE INTO note_shifts (note_id, shift_id) VALUES (?1, ?2)";
const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = ?1";

/// SQLite-backed [`AttendanceStore`].
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens the database in the platform data directory.
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { conn: db.conn })
    }

    /// Opens (or creates) a database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Db::open(path)?;
        Ok(Self { conn: db.conn })
    }
}

impl AttendanceStore for Store {
    fn load_shift_config(&mut self, id: i64) -> Result<Option<ShiftConfig>> {
        let query = format!("{} WHERE id = ?1", SELECT_SHIFT_COLUMNS);
        self.conn
            .query_row(&query, params![id], shift_from_row)
            .optional()
            .map_err(Into::into)
    }

    fn load_shifts(&mut self) -> Result<Vec<ShiftConfig>> {
        let query = format!("{} ORDER BY id", SELECT_SHIFT_COLUMNS);
        let mut stmt = self.conn.prepare(&query)?;
        let shifts = stmt.query_map([], shift_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(shifts)
    }

    fn save_shift(&mut self, shift: &ShiftConfig) -> Result<i64> {
        shift.validate().map_err(EngineError::from)?;

        let name = shift.name.trim();
        let taken: i64 = self
            .conn
            .query_row(SELECT_SHIFT_NAME_TAKEN, params![name, shift.id], |row| row.get(0))?;
        if taken > 0 {
            return Err(EngineError::DuplicateShiftName(name.to_string()).into());
        }

        let days = shift.days_applied.to_string();
        match shift.id {
            Some(id) => {
                let affected = self.conn.execute(
                    UPDATE_SHIFT,
                    params![
                        id,
                        name,
                        shift.departure_time.to_string(),
                        shift.start_time.to_string(),
                        shift.office_end_time.to_string(),
                        shift.end_time.to_string(),
                        shift.remind_before_start,
                        shift.remind_after_end,
                        days,
                        shift.show_sign_button
                    ],
                )?;
                if affected == 0 {
                    return Err(EngineError::MissingShift.into());
                }
                Ok(id)
            }
            None => {
                self.conn.execute(
                    INSERT_SHIFT,
                    params![
                        name,
                        shift.departure_time.to_string(),
                        shift.start_time.to_string(),
                        shift.office_end_time.to_string(),
                        shift.end_time.to_string(),
                        shift.remind_before_start,
                        shift.remind_after_end,
                        days,
                        shift.show_sign_button
                    ],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    fn delete_shift(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.execute(DELETE_SHIFT, params![id])? > 0)
    }

    fn load_events_for_date(&mut self, date: NaiveDate) -> Result<Vec<AttendanceEvent>> {
        let mut stmt = self.conn.prepare(SELECT_EVENTS_BY_DATE)?;
        let events = stmt
            .query_map(params![date], |row| {
                Ok(AttendanceEvent {
                    id: row.get(0)?,
                    action: parse_column(row, 1)?,
                    timestamp: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    fn append_event(&mut self, date: NaiveDate, event: &AttendanceEvent) -> Result<i64> {
        self.conn
            .execute(INSERT_EVENT, params![date, event.action.as_str(), event.timestamp])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn clear_events_for_date(&mut self, date: NaiveDate) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute(DELETE_EVENTS_BY_DATE, params![date])?;
        tx.execute(DELETE_STATUS, params![date])?;
        tx.commit()?;
        Ok(removed)
    }

    fn load_day_status(&mut self, date: NaiveDate) -> Result<Option<DayWorkStatus>> {
        let query = format!("{} WHERE date = ?1", SELECT_STATUS_COLUMNS);
        self.conn
            .query_row(&query, params![date], status_from_row)
            .optional()
            .map_err(Into::into)
    }

    fn save_day_status(&mut self, status: &DayWorkStatus) -> Result<()> {
        let override_status = status.manual.then(|| status.status.as_str());
        self.conn.execute(
            UPSERT_STATUS,
            params![
                status.date,
                status.status.as_str(),
                status.total_work_time,
                status.overtime,
                status.remarks,
                override_status,
                status.regular_hours
            ],
        )?;
        Ok(())
    }

    fn load_statuses_in_range(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DayWorkStatus>> {
        let query = format!("{} WHERE date BETWEEN ?1 AND ?2 ORDER BY date", SELECT_STATUS_COLUMNS);
        let mut stmt = self.conn.prepare(&query)?;
        let statuses = stmt
            .query_map(params![from, to], status_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(statuses)
    }

    fn load_notes(&mut self) -> Result<Vec<Note>> {
        let mut notes = {
            let mut stmt = self.conn.prepare(SELECT_NOTES)?;
            let rows = stmt.query_map([], |row| {
                let reminder_time: Option<String> = row.get(3)?;
                let reminder_time = reminder_time
                    .map(|time| time.parse::<ShiftTime>().map_err(|e| conversion_error(3, e)))
                    .transpose()?;
                Ok(Note {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    content: row.get(2)?,
                    reminder_time,
                    associated_shift_ids: Vec::new(),
                    explicit_reminder_days: parse_column(row, 4)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let mut stmt = self.conn.prepare(SELECT_NOTE_SHIFTS)?;
        for note in &mut notes {
            note.associated_shift_ids = stmt
                .query_map(params![note.id], |row| row.get(0))?
                .collect::<Result<Vec<i64>, _>>()?;
        }
        Ok(notes)
    }

    fn save_note(&mut self, note: &Note) -> Result<i64> {
        note.validate().map_err(EngineError::from)?;

        let (title, content) = (note.title.trim(), note.content.trim());
        let taken: i64 = self
            .conn
            .query_row(SELECT_NOTE_TAKEN, params![title, content], |row| row.get(0))?;
        if taken > 0 {
            return Err(EngineError::DuplicateNote.into());
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            INSERT_NOTE,
            params![
                title,
                content,
                note.reminder_time.map(|time| time.to_string()),
                note.explicit_reminder_days.to_string()
            ],
        )?;
        let id = tx.last_insert_rowid();
        for shift_id in &note.associated_shift_ids {
            tx.execute(INSERT_NOTE_SHIFT, params![id, shift_id])?;
        }
        tx.commit()?;
        Ok(id)
    }

    fn delete_note(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.execute(DELETE_NOTE, params![id])? > 0)
    }
}

fn shift_from_row(row: &Row) -> rusqlite::Result<ShiftConfig> {
    Ok(ShiftConfig {
        id: row.get(0)?,
        name: row.get(1)?,
        departure_time: parse_column(row, 2)?,
        start_time: parse_column(row, 3)?,
        office_end_time: parse_column(row, 4)?,
        end_time: parse_column(row, 5)?,
        remind_before_start: row.get(6)?,
        remind_after_end: row.get(7)?,
        days_applied: parse_column(row, 8)?,
        show_sign_button: row.get(9)?,
    })
}

fn status_from_row(row: &Row) -> rusqlite::Result<DayWorkStatus> {
    let override_status: Option<String> = row.get(5)?;
    Ok(DayWorkStatus {
        date: row.get(0)?,
        status: parse_column(row, 1)?,
        total_work_time: row.get(2)?,
        regular_hours: row.get(6)?,
        overtime: row.get(3)?,
        remarks: row.get(4)?,
        manual: override_status.is_some(),
    })
}

/// Reads a TEXT column and parses it with the type's `FromStr`.
fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: String = row.get(idx)?;
    text.parse().map_err(|e| conversion_error(idx, e))
}

fn conversion_error<E>(idx: usize, error: E) -> rusqlite::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, error.into())
}
