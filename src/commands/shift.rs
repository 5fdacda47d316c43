use crate::{
    db::store::Store,
    libs::{
        config::Config,
        messages::Message,
        shift::{ShiftConfig, ShiftTime, Weekdays},
        store::AttendanceStore,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct ShiftArgs {
    #[command(subcommand)]
    command: ShiftCommand,
}

#[derive(Debug, Subcommand)]
enum ShiftCommand {
    /// Add a shift; missing values are prompted for
    Add {
        /// Shift name
        name: Option<String>,
        /// Departure time (HH:MM)
        #[arg(long)]
        departure: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// End of regular hours (HH:MM)
        #[arg(long)]
        office_end: Option<String>,
        /// End of counted overtime (HH:MM)
        #[arg(long)]
        end: Option<String>,
        /// Days the shift recurs on (Mon,Tue,... or workweek or all)
        #[arg(long)]
        days: Option<String>,
        /// Minutes before start for the start reminder
        #[arg(long, default_value_t = 15)]
        remind_before: u32,
        /// Minutes after end for the end reminder
        #[arg(long, default_value_t = 15)]
        remind_after: u32,
    },
    /// List shifts
    List,
    /// Delete a shift
    Delete {
        /// Shift ID
        id: i64,
    },
    /// Record punches against this shift
    Activate {
        /// Shift ID
        id: i64,
    },
}

pub fn cmd(args: ShiftArgs) -> Result<()> {
    match args.command {
        ShiftCommand::Add {
            name,
            departure,
            start,
            office_end,
            end,
            days,
            remind_before,
            remind_after,
        } => {
            let name = value_or_prompt(name, Message::PromptShiftName, None)?;
            let departure_time = time_or_prompt(departure, Message::PromptDepartureTime)?;
            let start_time = time_or_prompt(start, Message::PromptStartTime)?;
            let office_end_time = time_or_prompt(office_end, Message::PromptOfficeEndTime)?;
            let end_time = time_or_prompt(end, Message::PromptEndTime)?;
            let days: Weekdays = value_or_prompt(days, Message::PromptShiftDays, Some("workweek"))?
                .parse()
                .map_err(anyhow::Error::msg)?;

            let mut shift = ShiftConfig::new(&name, departure_time, start_time, office_end_time, end_time, days);
            shift.remind_before_start = remind_before;
            shift.remind_after_end = remind_after;
            handle_add(shift)
        }
        ShiftCommand::List => handle_list(),
        ShiftCommand::Delete { id } => handle_delete(id),
        ShiftCommand::Activate { id } => handle_activate(id),
    }
}

fn handle_add(shift: ShiftConfig) -> Result<()> {
    let mut store = Store::new()?;
    let id = store.save_shift(&shift)?;
    msg_success!(Message::ShiftCreated(shift.name.clone()));

    // The first shift becomes the active one.
    let mut config = Config::read()?;
    if config.active_shift.is_none() {
        config.active_shift = Some(id);
        config.save()?;
        msg_info!(Message::ShiftActivated(shift.name));
    }
    Ok(())
}

fn handle_list() -> Result<()> {
    let shifts = Store::new()?.load_shifts()?;
    if shifts.is_empty() {
        msg_info!(Message::NoShiftsFound);
        return Ok(());
    }

    let config = Config::read()?;
    msg_print!(Message::ShiftsHeader, true);
    View::shifts(&shifts, config.active_shift)?;
    Ok(())
}

fn handle_delete(id: i64) -> Result<()> {
    let mut store = Store::new()?;
    let Some(shift) = store.load_shift_config(id)? else {
        msg_error!(Message::ShiftNotFound(id));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteShift(shift.name.clone()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    store.delete_shift(id)?;
    let mut config = Config::read()?;
    if config.active_shift == Some(id) {
        config.active_shift = None;
        config.save()?;
    }
    msg_success!(Message::ShiftDeleted(shift.name));
    Ok(())
}

fn handle_activate(id: i64) -> Result<()> {
    let Some(shift) = Store::new()?.load_shift_config(id)? else {
        msg_error!(Message::ShiftNotFound(id));
        return Ok(());
    };

    let mut config = Config::read()?;
    config.active_shift = Some(id);
    config.save()?;
    msg_success!(Message::ShiftActivated(shift.name));
    Ok(())
}

fn value_or_prompt(value: Option<String>, prompt: Message, default: Option<&str>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string());
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?)
}

fn time_or_prompt(value: Option<String>, prompt: Message) -> Result<ShiftTime> {
    match value {
        Some(value) => Ok(value.parse()?),
        None => {
            let value: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt.to_string())
                .validate_with(|input: &String| -> Result<(), String> {
                    input.parse::<ShiftTime>().map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()?;
            Ok(value.parse()?)
        }
    }
}
