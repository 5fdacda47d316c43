use super::attendance::AttendanceEvent;
use super::formatter::{format_duration, format_hours, format_instant};
use super::messages::Message;
use super::note::Note;
use super::reminder::{ReminderKind, ReminderPlan};
use super::shift::ShiftConfig;
use super::status::{DayStatus, DayWorkStatus};
use super::summary::PeriodSummary;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn shifts(shifts: &[ShiftConfig], active: Option<i64>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DEPARTURE", "START", "OFFICE END", "END", "DAYS", "ACTIVE"]);
        for shift in shifts {
            let is_active = shift.id.is_some() && shift.id == active;
            table.add_row(row![
                shift.id.unwrap_or(0),
                shift.name,
                shift.departure_time,
                shift.start_time,
                shift.office_end_time,
                shift.end_time,
                shift.days_applied,
                if is_active { "*" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn day(date: &NaiveDate, events: &[AttendanceEvent], status: &DayWorkStatus) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ACTION", "TIME"]);
        for event in events {
            table.add_row(row![event.action, format_instant(&event.local(), date)]);
        }
        table.add_empty_row();
        table.add_row(row!["STATUS", status.status]);
        table.add_row(row!["WORKED", format_duration(&hours_to_duration(status.total_work_time))]);
        table.add_row(row!["OVERTIME", format_hours(status.overtime)]);
        table.add_row(row!["REMARKS", status.remarks]);
        table.printstd();

        Ok(())
    }

    pub fn summary(summary: &PeriodSummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "DAY", "STATUS", "HOURS", "OVERTIME", "REMARKS"]);
        for day in &summary.days {
            table.add_row(row![
                day.date.format("%Y-%m-%d"),
                day.date.format("%a"),
                day.status,
                format_hours(day.total_work_time),
                format_hours(day.overtime),
                day.remarks
            ]);
        }
        table.add_row(row![
            "TOTAL",
            "",
            "",
            format_hours(summary.total_hours),
            format_hours(summary.overtime_hours),
            ""
        ]);
        table.printstd();

        let mut counts = Table::new();
        counts.add_row(row!["STATUS", "DAYS"]);
        for status in DayStatus::ALL {
            let count = summary.count(status);
            if count > 0 {
                counts.add_row(row![status, count]);
            }
        }
        counts.printstd();

        Ok(())
    }

    pub fn notes(notes: &[Note], shifts: &[ShiftConfig]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "CONTENT", "TIME", "SCHEDULE"]);
        for note in notes {
            let schedule = if note.associated_shift_ids.is_empty() {
                note.explicit_reminder_days.to_string()
            } else {
                shifts
                    .iter()
                    .filter(|shift| shift.id.is_some_and(|id| note.associated_shift_ids.contains(&id)))
                    .map(|shift| shift.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            table.add_row(row![
                note.id.unwrap_or(0),
                note.title,
                note.content,
                note.reminder_time.map(|time| time.to_string()).unwrap_or_default(),
                schedule
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn reminders(date: &NaiveDate, plan: &ReminderPlan) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TIME", "REMINDER"]);
        for reminder in &plan.reminders {
            let text = match &reminder.kind {
                ReminderKind::Departure => Message::ReminderDeparture,
                ReminderKind::BeforeStart => Message::ReminderBeforeStart,
                ReminderKind::AfterEnd => Message::ReminderAfterEnd,
                ReminderKind::Note { title } => Message::ReminderNote(title.clone()),
            };
            table.add_row(row![format_instant(&reminder.at, date), text]);
        }
        table.printstd();

        Ok(())
    }
}

fn hours_to_duration(hours: f64) -> Duration {
    Duration::minutes((hours * 60.0).round() as i64)
}
