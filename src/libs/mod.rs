//! Core library modules for the shiftclock application.
//!
//! ## Layout
//!
//! - **Shift model**: [`shift`], [`time_window`], [`attendance`]
//! - **Attendance engine**: [`gate`], [`window`], [`work_hours`], [`status`], [`summary`]
//! - **Reminders**: [`note`], [`reminder`]
//! - **Infrastructure**: [`config`], [`data_storage`], [`error`], [`messages`], [`store`]
//! - **Workflow and output**: [`punch`], [`formatter`], [`view`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shiftclock::db::memory::MemoryStore;
//! use shiftclock::libs::config::RulesConfig;
//! use shiftclock::libs::punch::Punch;
//!
//! let rules = RulesConfig::default();
//! let punch = Punch::new(&rules);
//! let mut store = MemoryStore::default();
//! # let _ = (&punch, &mut store);
//! ```

pub mod attendance;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod gate;
pub mod messages;
pub mod note;
pub mod punch;
pub mod reminder;
pub mod shift;
pub mod status;
pub mod store;
pub mod summary;
pub mod time_window;
pub mod view;
pub mod window;
pub mod work_hours;
