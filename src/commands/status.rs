use super::{active_shift, parse_date};
use crate::{
    db::store::Store,
    libs::{
        config::Config,
        messages::Message,
        punch::Punch,
        status::ManualStatus,
        store::AttendanceStore,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[arg(long, short, default_value = "today", help = "Date to show (YYYY-MM-DD or 'today')")]
    date: String,

    /// Mark the day by hand; the status is no longer derived from punches
    #[arg(long, value_enum, conflicts_with = "reset")]
    set: Option<ManualStatus>,

    /// Delete the day's punches and status
    #[arg(long)]
    reset: bool,
}

pub fn cmd(args: StatusArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let mut store = Store::new()?;

    if let Some(status) = args.set {
        let saved = Punch::set_manual(&mut store, date, status)?;
        msg_success!(Message::ManualStatusSet {
            date: date.to_string(),
            status: saved.status.to_string(),
        });
        return Ok(());
    }

    if args.reset {
        return handle_reset(&mut store, date);
    }

    let events = store.load_events_for_date(date)?;
    let status = match store.load_day_status(date)? {
        Some(status) => status,
        None if events.is_empty() => {
            msg_info!(Message::StatusNotStored(date.to_string()));
            return Ok(());
        }
        None => {
            let config = Config::read()?;
            let shift = active_shift(&mut store, &config)?;
            Punch::new(&config.rules).refresh(&mut store, &shift, date)?
        }
    };

    msg_print!(Message::StatusHeader(date.to_string()), true);
    View::day(&date, &events, &status)?;
    Ok(())
}

fn handle_reset(store: &mut Store, date: NaiveDate) -> Result<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmResetDay(date.to_string()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    Punch::reset(store, date)?;
    msg_success!(Message::DayReset(date.to_string()));
    Ok(())
}
