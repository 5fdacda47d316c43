use super::parse_date;
use crate::{
    db::store::Store,
    libs::{config::Config, messages::Message, reminder::ReminderPlan, store::AttendanceStore, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RemindArgs {
    #[arg(long, short, default_value = "today", help = "Date to plan (YYYY-MM-DD or 'today')")]
    date: String,
}

pub fn cmd(args: RemindArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let config = Config::read()?;
    let mut store = Store::new()?;

    let shift = match config.active_shift {
        Some(id) => store.load_shift_config(id)?,
        None => None,
    };
    let plan = shift
        .as_ref()
        .map(|shift| ReminderPlan::for_date(shift, date))
        .unwrap_or_default()
        .with_notes(&store.load_notes()?, &store.load_shifts()?, date);

    if plan.reminders.is_empty() {
        msg_info!(Message::NoRemindersForDate(date.to_string()));
        return Ok(());
    }

    msg_print!(Message::RemindersHeader(date.to_string()), true);
    View::reminders(&date, &plan)?;
    Ok(())
}
