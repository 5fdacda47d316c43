//! In-memory [`AttendanceStore`] for tests and embedding hosts that keep
//! their own persistence.

use crate::libs::attendance::AttendanceEvent;
use crate::libs::error::EngineError;
use crate::libs::note::Note;
use crate::libs::shift::ShiftConfig;
use crate::libs::status::DayWorkStatus;
use crate::libs::store::AttendanceStore;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    shifts: BTreeMap<i64, ShiftConfig>,
    events: BTreeMap<NaiveDate, Vec<AttendanceEvent>>,
    statuses: BTreeMap<NaiveDate, DayWorkStatus>,
    notes: BTreeMap<i64, Note>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl AttendanceStore for MemoryStore {
    fn load_shift_config(&mut self, id: i64) -> Result<Option<ShiftConfig>> {
        Ok(self.shifts.get(&id).cloned())
    }

    fn load_shifts(&mut self) -> Result<Vec<ShiftConfig>> {
        Ok(self.shifts.values().cloned().collect())
    }

    fn save_shift(&mut self, shift: &ShiftConfig) -> Result<i64> {
        shift.validate().map_err(EngineError::from)?;
        let taken = self
            .shifts
            .values()
            .any(|other| other.id != shift.id && other.name.trim().eq_ignore_ascii_case(shift.name.trim()));
        if taken {
            return Err(EngineError::DuplicateShiftName(shift.name.clone()).into());
        }

        let id = match shift.id {
            Some(id) => id,
            None => self.next_id(),
        };
        self.shifts.insert(
            id,
            ShiftConfig {
                id: Some(id),
                ..shift.clone()
            },
        );
        Ok(id)
    }

    fn delete_shift(&mut self, id: i64) -> Result<bool> {
        Ok(self.shifts.remove(&id).is_some())
    }

    fn load_events_for_date(&mut self, date: NaiveDate) -> Result<Vec<AttendanceEvent>> {
        Ok(self.events.get(&date).cloned().unwrap_or_default())
    }

    fn append_event(&mut self, date: NaiveDate, event: &AttendanceEvent) -> Result<i64> {
        let id = self.next_id();
        self.events.entry(date).or_default().push(AttendanceEvent {
            id: Some(id),
            ..event.clone()
        });
        Ok(id)
    }

    fn clear_events_for_date(&mut self, date: NaiveDate) -> Result<usize> {
        self.statuses.remove(&date);
        Ok(self.events.remove(&date).map_or(0, |events| events.len()))
    }

    fn load_day_status(&mut self, date: NaiveDate) -> Result<Option<DayWorkStatus>> {
        Ok(self.statuses.get(&date).cloned())
    }

    fn save_day_status(&mut self, status: &DayWorkStatus) -> Result<()> {
        self.statuses.insert(status.date, status.clone());
        Ok(())
    }

    fn load_statuses_in_range(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DayWorkStatus>> {
        Ok(self.statuses.range(from..=to).map(|(_, status)| status.clone()).collect())
    }

    fn load_notes(&mut self) -> Result<Vec<Note>> {
        Ok(self.notes.values().cloned().collect())
    }

    fn save_note(&mut self, note: &Note) -> Result<i64> {
        note.validate().map_err(EngineError::from)?;
        if self.notes.values().any(|other| other.same_text(note)) {
            return Err(EngineError::DuplicateNote.into());
        }
        let id = self.next_id();
        self.notes.insert(
            id,
            Note {
                id: Some(id),
                ..note.clone()
            },
        );
        Ok(id)
    }

    fn delete_note(&mut self, id: i64) -> Result<bool> {
        Ok(self.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::Weekdays;

    fn shift(name: &str) -> ShiftConfig {
        ShiftConfig::new(
            name,
            "07:30".parse().unwrap(),
            "08:00".parse().unwrap(),
            "17:00".parse().unwrap(),
            "19:00".parse().unwrap(),
            Weekdays::workweek(),
        )
    }

    #[test]
    fn test_shift_names_are_unique_ignoring_case() {
        let mut store = MemoryStore::new();
        let id = store.save_shift(&shift("Day")).unwrap();

        let err = store.save_shift(&shift("day")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::DuplicateShiftName(_))
        ));

        // Updating the same shift keeps its own name.
        let mut same = store.load_shift_config(id).unwrap().unwrap();
        same.remind_before_start = 5;
        assert_eq!(store.save_shift(&same).unwrap(), id);
        assert_eq!(store.load_shifts().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_shift_is_rejected() {
        let mut store = MemoryStore::new();
        let mut bad = shift("Day");
        bad.departure_time = "07:58".parse().unwrap();
        let err = store.save_shift(&bad).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidShiftConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_note_is_rejected() {
        let mut store = MemoryStore::new();
        let mut note = Note::new("Badge", "Bring the badge");
        note.explicit_reminder_days = Weekdays::all();
        store.save_note(&note).unwrap();

        let err = store.save_note(&note).unwrap_err();
        assert!(matches!(err.downcast_ref::<EngineError>(), Some(EngineError::DuplicateNote)));
    }
}
