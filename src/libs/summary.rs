//! Weekly and monthly aggregation of day statuses.
//!
//! A pure fold: every day in the range gets a [`DayWorkStatus`] (scheduled
//! days with nothing stored become `NotUpdated`) and hours are summed per
//! category.

use crate::libs::shift::ShiftConfig;
use crate::libs::status::{DayStatus, DayWorkStatus};
use crate::libs::work_hours::round2;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
}

impl Period {
    /// First and last day (inclusive) of the period containing `date`.
    /// Weeks run Monday to Sunday.
    pub fn range(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Week => {
                let from = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (from, from + Duration::days(6))
            }
            Period::Month => {
                let from = date.with_day(1).unwrap_or(date);
                let next_month = if from.month() == 12 {
                    NaiveDate::from_ymd_opt(from.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(from.year(), from.month() + 1, 1)
                };
                let to = next_month.and_then(|d| d.pred_opt()).unwrap_or(from);
                (from, to)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DayWorkStatus>,
    /// All credited hours, including overtime minutes below the threshold.
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    /// Hours on days that were full attendance or overtime.
    pub full_attendance_hours: f64,
    pub counts: BTreeMap<DayStatus, usize>,
}

impl PeriodSummary {
    pub fn count(&self, status: DayStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn attended_days(&self) -> usize {
        self.days.iter().filter(|day| day.status.is_attended()).count()
    }
}

pub trait SummaryCalculator {
    /// Adds a `NotUpdated` entry for every day in `[from, to]` with no
    /// status, skipping days `shift` is not scheduled on.
    fn add_missing_days(self, from: NaiveDate, to: NaiveDate, shift: Option<&ShiftConfig>) -> Self;

    fn calculate_totals(self, from: NaiveDate, to: NaiveDate) -> PeriodSummary;
}

impl SummaryCalculator for Vec<DayWorkStatus> {
    fn add_missing_days(mut self, from: NaiveDate, to: NaiveDate, shift: Option<&ShiftConfig>) -> Self {
        let mut date = from;
        while date <= to {
            let scheduled = shift.map_or(true, |s| s.applies_on(date.weekday()));
            if scheduled && !self.iter().any(|day| day.date == date) {
                self.push(DayWorkStatus::not_updated(date));
            }
            date += Duration::days(1);
        }
        self
    }

    fn calculate_totals(mut self, from: NaiveDate, to: NaiveDate) -> PeriodSummary {
        self.retain(|day| day.date >= from && day.date <= to);
        self.sort_by_key(|day| day.date);

        let mut counts = BTreeMap::new();
        let (mut total, mut regular, mut overtime, mut full) = (0.0, 0.0, 0.0, 0.0);
        for day in &self {
            *counts.entry(day.status).or_insert(0) += 1;
            total += day.total_work_time;
            regular += day.regular_hours;
            overtime += day.overtime;
            if matches!(day.status, DayStatus::FullAttendance | DayStatus::Overtime) {
                full += day.total_work_time;
            }
        }

        PeriodSummary {
            from,
            to,
            days: self,
            total_hours: round2(total),
            regular_hours: round2(regular),
            overtime_hours: round2(overtime),
            full_attendance_hours: round2(full),
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shift::Weekdays;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn status(date: NaiveDate, status: DayStatus, total: f64, regular: f64, overtime: f64) -> DayWorkStatus {
        DayWorkStatus {
            date,
            status,
            total_work_time: total,
            regular_hours: regular,
            overtime,
            remarks: String::new(),
            manual: false,
        }
    }

    #[test]
    fn test_period_ranges() {
        // 2025-03-12 is a Wednesday.
        assert_eq!(Period::Week.range(d(3, 12)), (d(3, 10), d(3, 16)));
        assert_eq!(Period::Month.range(d(2, 14)), (d(2, 1), d(2, 28)));
        assert_eq!(Period::Month.range(d(12, 31)), (d(12, 1), d(12, 31)));
    }

    #[test]
    fn test_totals_by_category() {
        let (from, to) = Period::Week.range(d(3, 12));
        let summary = vec![
            status(d(3, 10), DayStatus::FullAttendance, 8.0, 8.0, 0.0),
            status(d(3, 11), DayStatus::Overtime, 10.5, 9.0, 1.5),
            status(d(3, 12), DayStatus::LateArrival, 7.67, 7.67, 0.0),
            status(d(3, 13), DayStatus::Sick, 0.0, 0.0, 0.0),
            status(d(3, 20), DayStatus::FullAttendance, 8.0, 8.0, 0.0),
        ]
        .calculate_totals(from, to);

        assert_eq!(summary.days.len(), 4);
        assert_eq!(summary.total_hours, 26.17);
        assert_eq!(summary.overtime_hours, 1.5);
        assert_eq!(summary.regular_hours, 24.67);
        assert_eq!(summary.full_attendance_hours, 18.5);
        assert_eq!(summary.count(DayStatus::Sick), 1);
        assert_eq!(summary.attended_days(), 3);
    }

    #[test]
    fn test_missing_scheduled_days_become_not_updated() {
        let (from, to) = Period::Week.range(d(3, 12));
        let shift = ShiftConfig::new(
            "Day",
            "07:30".parse().unwrap(),
            "08:00".parse().unwrap(),
            "17:00".parse().unwrap(),
            "17:00".parse().unwrap(),
            Weekdays::workweek(),
        );

        let summary = vec![status(d(3, 10), DayStatus::FullAttendance, 8.0, 8.0, 0.0)]
            .add_missing_days(from, to, Some(&shift))
            .calculate_totals(from, to);

        assert_eq!(summary.days.len(), 5);
        assert_eq!(summary.count(DayStatus::NotUpdated), 4);
        assert_eq!(summary.days[0].date, d(3, 10));
    }

    #[test]
    fn test_unawarded_overtime_is_not_regular() {
        let (from, to) = Period::Week.range(d(3, 12));
        let summary = vec![
            status(d(3, 10), DayStatus::FullAttendance, 9.25, 9.0, 0.0),
            status(d(3, 11), DayStatus::Overtime, 10.0, 9.0, 1.0),
        ]
        .calculate_totals(from, to);

        assert_eq!(summary.total_hours, 19.25);
        assert_eq!(summary.regular_hours, 18.0);
        assert_eq!(summary.overtime_hours, 1.0);
    }
}
