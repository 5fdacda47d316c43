//! # Shiftclock - shift attendance tracking
//!
//! A command-line utility for recording shift attendance and deriving the
//! daily work status from it.
//!
//! ## Features
//!
//! - **Shifts**: Recurring shifts with departure, start, office end and overtime end times
//! - **Overnight Support**: Windows that cross midnight are attributed to the day they start
//! - **Guarded Punches**: `go_work → check_in → check_out → complete` with minimum gaps
//! - **Time Windows**: Early and late check-in/out detection with a tolerance
//! - **Daily Status**: Full attendance, late arrival, early departure, late and early, overtime or incomplete, derived from punches; leave, sick, holiday and absent are set by hand
//! - **Summaries**: Weekly and monthly totals with per-status counts
//! - **Reminders**: Shift reminders and notes bound to weekdays or shifts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shiftclock::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
