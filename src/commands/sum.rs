use super::parse_date;
use crate::{
    db::store::Store,
    libs::{
        config::Config,
        formatter::format_hours,
        messages::Message,
        store::AttendanceStore,
        summary::{Period, SummaryCalculator},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct SumArgs {
    /// Summarize the week (Monday to Sunday) instead of the month
    #[arg(long, short, conflicts_with = "month")]
    week: bool,

    /// Summarize the calendar month (the default)
    #[arg(long, short)]
    month: bool,

    #[arg(long, short, default_value = "today", help = "Any date inside the period (YYYY-MM-DD or 'today')")]
    date: String,
}

pub fn cmd(sum_args: SumArgs) -> Result<()> {
    let date = parse_date(&sum_args.date)?;
    let period = if sum_args.week && !sum_args.month { Period::Week } else { Period::Month };
    let (from, to) = period.range(date);

    let config = Config::read()?;
    let mut store = Store::new()?;
    let shift = match config.active_shift {
        Some(id) => store.load_shift_config(id)?,
        None => None,
    };

    // Days still ahead are not reported as missing.
    let today = Local::now().date_naive();
    let summary = store
        .load_statuses_in_range(from, to)?
        .add_missing_days(from, to.min(today), shift.as_ref())
        .calculate_totals(from, to);

    msg_print!(
        Message::SummaryHeader {
            from: from.to_string(),
            to: to.to_string(),
        },
        true
    );
    View::summary(&summary)?;
    msg_info!(Message::SummaryTotals {
        total: format_hours(summary.total_hours),
        regular: format_hours(summary.regular_hours),
        overtime: format_hours(summary.overtime_hours),
    });
    Ok(())
}
