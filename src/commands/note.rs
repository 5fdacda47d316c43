use crate::{
    db::store::Store,
    libs::{
        messages::Message,
        note::Note,
        shift::{ShiftTime, Weekdays},
        store::AttendanceStore,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct NoteArgs {
    #[command(subcommand)]
    command: NoteCommand,
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    /// Add a note; title and content are prompted for when missing
    Add {
        /// Note title
        #[arg(long)]
        title: Option<String>,
        /// Note content
        #[arg(long)]
        content: Option<String>,
        /// Reminder time (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Remind on these days (Mon,Fri or workweek or all)
        #[arg(long)]
        days: Option<String>,
        /// Remind on the days of these shifts (IDs); overrides --days
        #[arg(long = "shift", value_delimiter = ',')]
        shifts: Vec<i64>,
    },
    /// List notes
    List,
    /// Delete a note
    Delete {
        /// Note ID
        id: i64,
    },
}

pub fn cmd(args: NoteArgs) -> Result<()> {
    match args.command {
        NoteCommand::Add {
            title,
            content,
            time,
            days,
            shifts,
        } => handle_add(title, content, time, days, shifts),
        NoteCommand::List => handle_list(),
        NoteCommand::Delete { id } => handle_delete(id),
    }
}

fn handle_add(
    title: Option<String>,
    content: Option<String>,
    time: Option<String>,
    days: Option<String>,
    shifts: Vec<i64>,
) -> Result<()> {
    let title = match title {
        Some(title) => title,
        None => prompt(Message::PromptNoteTitle, false)?,
    };
    let content = match content {
        Some(content) => content,
        None => prompt(Message::PromptNoteContent, false)?,
    };
    let time = match time {
        Some(time) => time,
        None => prompt(Message::PromptNoteReminderTime, true)?,
    };
    let days = match days {
        Some(days) => days,
        None if shifts.is_empty() => prompt(Message::PromptNoteDays, true)?,
        None => String::new(),
    };

    let mut note = Note::new(&title, &content);
    if !time.trim().is_empty() {
        note.reminder_time = Some(time.parse::<ShiftTime>()?);
    }
    note.explicit_reminder_days = days.parse::<Weekdays>().map_err(anyhow::Error::msg)?;
    note.associated_shift_ids = shifts;

    Store::new()?.save_note(&note)?;
    msg_success!(Message::NoteCreated(note.title));
    Ok(())
}

fn handle_list() -> Result<()> {
    let mut store = Store::new()?;
    let notes = store.load_notes()?;
    if notes.is_empty() {
        msg_info!(Message::NoNotesFound);
        return Ok(());
    }

    let shifts = store.load_shifts()?;
    msg_print!(Message::NotesHeader, true);
    View::notes(&notes, &shifts)?;
    Ok(())
}

fn handle_delete(id: i64) -> Result<()> {
    let mut store = Store::new()?;
    let Some(note) = store.load_notes()?.into_iter().find(|note| note.id == Some(id)) else {
        msg_error!(Message::NoteNotFound(id));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteNote(note.title.clone()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    store.delete_note(id)?;
    msg_success!(Message::NoteDeleted(note.title));
    Ok(())
}

fn prompt(message: Message, allow_empty: bool) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(message.to_string())
        .allow_empty(allow_empty)
        .interact_text()?)
}
