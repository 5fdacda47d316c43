//! Note reminders tied to shifts or weekdays.
//!
//! A note is scheduled either through the shifts it is associated with or
//! through an explicit set of weekdays. Associated shifts win: as soon as
//! one shift is linked, the explicit days are ignored.

use crate::libs::error::NoteViolation;
use crate::libs::shift::{ShiftConfig, ShiftTime, Weekdays};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_CONTENT_LENGTH: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub reminder_time: Option<ShiftTime>,
    pub associated_shift_ids: Vec<i64>,
    pub explicit_reminder_days: Weekdays,
}

impl Note {
    pub fn new(title: &str, content: &str) -> Self {
        Note {
            id: None,
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            reminder_time: None,
            associated_shift_ids: Vec::new(),
            explicit_reminder_days: Weekdays::none(),
        }
    }

    pub fn validate(&self) -> Result<(), NoteViolation> {
        if self.title.trim().is_empty() {
            return Err(NoteViolation::EmptyTitle);
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(NoteViolation::TitleTooLong { max: MAX_TITLE_LENGTH });
        }
        if self.content.trim().is_empty() {
            return Err(NoteViolation::EmptyContent);
        }
        if self.content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(NoteViolation::ContentTooLong {
                max: MAX_CONTENT_LENGTH,
            });
        }
        if self.associated_shift_ids.is_empty() && self.explicit_reminder_days.is_empty() {
            return Err(NoteViolation::NoSchedule);
        }
        Ok(())
    }

    /// Two notes with the same title and content are duplicates.
    pub fn same_text(&self, other: &Note) -> bool {
        self.title.trim() == other.title.trim() && self.content.trim() == other.content.trim()
    }

    /// Whether the note is due on `day`. `shifts` is used to look up the
    /// associated shift ids; unknown ids are ignored.
    pub fn applies_on(&self, day: Weekday, shifts: &[ShiftConfig]) -> bool {
        if self.associated_shift_ids.is_empty() {
            return self.explicit_reminder_days.contains(day);
        }
        shifts
            .iter()
            .filter(|shift| shift.id.is_some_and(|id| self.associated_shift_ids.contains(&id)))
            .any(|shift| shift.applies_on(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(id: i64, days: Weekdays) -> ShiftConfig {
        let mut shift = ShiftConfig::new(
            "Shift",
            "07:30".parse().unwrap(),
            "08:00".parse().unwrap(),
            "17:00".parse().unwrap(),
            "17:00".parse().unwrap(),
            days,
        );
        shift.id = Some(id);
        shift
    }

    #[test]
    fn test_note_needs_a_schedule() {
        let note = Note::new("Bring badge", "Security check at the gate");
        assert_eq!(note.validate(), Err(NoteViolation::NoSchedule));

        let mut note = note;
        note.explicit_reminder_days = Weekdays::from_days(&[Weekday::Mon]);
        assert_eq!(note.validate(), Ok(()));
    }

    #[test]
    fn test_note_text_limits() {
        let mut note = Note::new("", "content");
        note.explicit_reminder_days = Weekdays::all();
        assert_eq!(note.validate(), Err(NoteViolation::EmptyTitle));

        note.title = "t".repeat(101);
        assert_eq!(note.validate(), Err(NoteViolation::TitleTooLong { max: 100 }));

        note.title = "Title".to_string();
        note.content = " ".to_string();
        assert_eq!(note.validate(), Err(NoteViolation::EmptyContent));
    }

    #[test]
    fn test_associated_shifts_override_explicit_days() {
        let shifts = vec![shift(1, Weekdays::from_days(&[Weekday::Sat])), shift(2, Weekdays::workweek())];

        let mut note = Note::new("Overtime form", "Submit the weekend form");
        note.explicit_reminder_days = Weekdays::from_days(&[Weekday::Mon]);
        assert!(note.applies_on(Weekday::Mon, &shifts));
        assert!(!note.applies_on(Weekday::Sat, &shifts));

        note.associated_shift_ids = vec![1];
        assert!(note.applies_on(Weekday::Sat, &shifts));
        assert!(!note.applies_on(Weekday::Mon, &shifts));
    }

    #[test]
    fn test_duplicate_detection_ignores_padding() {
        let a = Note::new("Badge", "Bring it");
        let mut b = Note::new("Badge", "Bring it");
        b.content = " Bring it ".to_string();
        assert!(a.same_text(&b));
    }
}
