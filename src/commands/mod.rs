//! Command-line interface.
//!
//! One module per sub-command, each exposing an `Args` struct and a `cmd`
//! function. [`Cli::menu`] parses the arguments and dispatches.

pub mod init;
pub mod note;
pub mod punch;
pub mod remind;
pub mod shift;
pub mod status;
pub mod sum;

use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::shift::ShiftConfig;
use crate::libs::store::AttendanceStore;
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure attendance rules")]
    Init(init::InitArgs),
    #[command(about = "Manage shifts")]
    Shift(shift::ShiftArgs),
    #[command(about = "Record go-work, check-in, check-out or complete", arg_required_else_help = true)]
    Punch(punch::PunchArgs),
    #[command(about = "Show or change the attendance status of a day")]
    Status(status::StatusArgs),
    #[command(about = "Weekly or monthly summary")]
    Sum(sum::SumArgs),
    #[command(about = "Manage reminder notes")]
    Note(note::NoteArgs),
    #[command(about = "Show the reminders scheduled for a day")]
    Remind(remind::RemindArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Shift(args) => shift::cmd(args),
            Commands::Punch(args) => punch::cmd(args),
            Commands::Status(args) => status::cmd(args),
            Commands::Sum(args) => sum::cmd(args),
            Commands::Note(args) => note::cmd(args),
            Commands::Remind(args) => remind::cmd(args),
        }
    }
}

/// Parses 'today' or a YYYY-MM-DD date.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        return Ok(Local::now().date_naive());
    }
    match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => msg_bail_anyhow!(Message::InvalidDate(date_str.to_string())),
    }
}

/// The shift punches are recorded against.
pub(crate) fn active_shift<S: AttendanceStore>(store: &mut S, config: &Config) -> Result<ShiftConfig> {
    let Some(id) = config.active_shift else {
        msg_bail_anyhow!(Message::NoActiveShift);
    };
    match store.load_shift_config(id)? {
        Some(shift) => Ok(shift),
        None => msg_bail_anyhow!(Message::ActiveShiftMissing(id)),
    }
}
