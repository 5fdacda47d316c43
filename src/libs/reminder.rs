//! Reminder instants for a notification scheduler.
//!
//! Nothing is scheduled here. The plan lists the concrete instants derived
//! from the anchored shift window (departure, `start - remind_before_start`,
//! `end + remind_after_end`) and from notes due that day, so the host's
//! scheduler can place them.

use crate::libs::note::Note;
use crate::libs::shift::ShiftConfig;
use crate::libs::time_window::ShiftWindow;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderKind {
    Departure,
    BeforeStart,
    AfterEnd,
    Note { title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub at: NaiveDateTime,
    pub kind: ReminderKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPlan {
    pub reminders: Vec<Reminder>,
}

impl ReminderPlan {
    /// Shift reminders for `date`; empty when the shift does not recur on
    /// that weekday.
    pub fn for_date(shift: &ShiftConfig, date: NaiveDate) -> Self {
        if !shift.applies_on(date.weekday()) {
            return ReminderPlan::default();
        }

        let window = ShiftWindow::anchor(shift, date);
        let mut plan = ReminderPlan {
            reminders: vec![
                Reminder {
                    at: window.departure,
                    kind: ReminderKind::Departure,
                },
                Reminder {
                    at: window.start - Duration::minutes(shift.remind_before_start as i64),
                    kind: ReminderKind::BeforeStart,
                },
                Reminder {
                    at: window.end + Duration::minutes(shift.remind_after_end as i64),
                    kind: ReminderKind::AfterEnd,
                },
            ],
        };
        plan.sort();
        plan
    }

    /// Adds reminders for notes due on `date` that carry a reminder time.
    pub fn with_notes(mut self, notes: &[Note], shifts: &[ShiftConfig], date: NaiveDate) -> Self {
        for note in notes {
            if let Some(time) = note.reminder_time {
                if note.applies_on(date.weekday(), shifts) {
                    self.reminders.push(Reminder {
                        at: date.and_time(time.to_naive_time()),
                        kind: ReminderKind::Note {
                            title: note.title.clone(),
                        },
                    });
                }
            }
        }
        self.sort();
        self
    }

    fn sort(&mut self) {
        self.reminders.sort_by_key(|reminder| reminder.at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::Weekdays;

    fn night_shift() -> ShiftConfig {
        let mut shift = ShiftConfig::new(
            "Night",
            "21:15".parse().unwrap(),
            "22:00".parse().unwrap(),
            "06:00".parse().unwrap(),
            "06:00".parse().unwrap(),
            Weekdays::workweek(),
        );
        shift.id = Some(3);
        shift.remind_before_start = 30;
        shift.remind_after_end = 10;
        shift
    }

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_shift_reminders_follow_anchored_window() {
        // 2025-03-10 is a Monday.
        let plan = ReminderPlan::for_date(&night_shift(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let instants: Vec<NaiveDateTime> = plan.reminders.iter().map(|r| r.at).collect();
        assert_eq!(instants, vec![dt(10, 21, 15), dt(10, 21, 30), dt(11, 6, 10)]);
    }

    #[test]
    fn test_no_reminders_on_unscheduled_day() {
        let plan = ReminderPlan::for_date(&night_shift(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert!(plan.reminders.is_empty());
    }

    #[test]
    fn test_note_reminders_are_merged_in_order() {
        let shift = night_shift();
        let mut note = Note::new("Timesheet", "Send the weekly timesheet");
        note.reminder_time = Some("21:20".parse().unwrap());
        note.associated_shift_ids = vec![3];

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let plan = ReminderPlan::for_date(&shift, date).with_notes(&[note], &[shift.clone()], date);
        assert_eq!(plan.reminders.len(), 4);
        assert_eq!(
            plan.reminders[1].kind,
            ReminderKind::Note {
                title: "Timesheet".to_string()
            }
        );
    }
}
