//! Records a punch against the active shift.
//!
//! Timing blocks and out-of-window punches ask for confirmation before they
//! are recorded (or are recorded straight away with `--force`). Sequence
//! violations are reported and nothing is written.

use super::active_shift;
use crate::{
    db::store::Store,
    libs::{
        attendance::ActionType,
        config::Config,
        formatter::format_hours,
        gate::{GateDecision, GateReason},
        messages::Message,
        punch::{Punch, PunchOutcome},
        shift::ShiftTime,
    },
    msg_bail_anyhow, msg_error, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, TimeZone};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct PunchArgs {
    /// Action to record
    #[arg(value_enum)]
    action: ActionType,

    /// Record the punch at this time today (HH:MM) instead of now
    #[arg(long)]
    at: Option<String>,

    /// Record past timing rules and window warnings without asking
    #[arg(short, long)]
    force: bool,
}

pub fn cmd(args: PunchArgs) -> Result<()> {
    let config = Config::read()?;
    let mut store = Store::new()?;
    let shift = active_shift(&mut store, &config)?;
    let now = punch_time(args.at.as_deref())?;

    let punch = Punch::new(&config.rules);
    let preview = punch.preview(&mut store, &shift, args.action, now)?;
    let mut force = args.force;

    if let Some(reason) = preview.gate.reason {
        if !reason.is_forcible() {
            msg_error!(block_message(args.action, &preview.gate));
            return Ok(());
        }
        msg_warning!(block_message(args.action, &preview.gate));
        if !force && !confirm()? {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
        force = true;
    }

    if let Some(warning) = preview.window.as_ref().and_then(|check| check.message.as_ref()) {
        msg_warning!(warning);
        if !force && !confirm()? {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    match punch.perform(&mut store, &shift, args.action, now, force)? {
        PunchOutcome::Recorded {
            event, status, forced, ..
        } => {
            if forced {
                msg_info!(Message::PunchForced);
            }
            msg_success!(Message::PunchRecorded {
                action: event.action,
                at: event.local().format("%Y-%m-%d %H:%M").to_string(),
            });
            msg_info!(Message::DayStatusUpdated {
                status: status.status.to_string(),
                hours: format_hours(status.total_work_time),
            });
        }
        PunchOutcome::Blocked(preview) => {
            msg_error!(block_message(args.action, &preview.gate));
        }
    }
    Ok(())
}

fn block_message(action: ActionType, gate: &GateDecision) -> Message {
    match gate.reason {
        Some(GateReason::OutOfSequence { expected }) => Message::PunchOutOfSequence { expected },
        Some(GateReason::DayCompleted) => Message::PunchDayCompleted,
        _ => Message::PunchWaitRequired { action, wait: gate.wait },
    }
}

fn confirm() -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmProceedAnyway.to_string())
        .default(false)
        .interact()?)
}

/// Now, or today at `at`, with the local UTC offset.
fn punch_time(at: Option<&str>) -> Result<DateTime<FixedOffset>> {
    let Some(at) = at else {
        return Ok(Local::now().fixed_offset());
    };
    let Ok(time) = at.parse::<ShiftTime>() else {
        msg_bail_anyhow!(Message::InvalidTime(at.to_string()));
    };
    let naive = Local::now().date_naive().and_time(time.to_naive_time());
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => Ok(local.fixed_offset()),
        None => msg_bail_anyhow!(Message::InvalidTime(at.to_string())),
    }
}
