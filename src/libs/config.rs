//! Configuration management for the shiftclock application.
//!
//! Holds the tunable thresholds of the attendance engine and the id of the
//! shift that punches are recorded against. The file is plain JSON stored in
//! the platform data directory resolved by [`DataStorage`]:
//!
//! - **Windows**: `%LOCALAPPDATA%\shiftclock\config.json`
//! - **macOS**: `~/Library/Application Support/shiftclock/config.json`
//! - **Linux**: `~/.local/share/shiftclock/config.json`
//!
//! A missing file is not an error; defaults are used instead.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use shiftclock::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.rules.window_tolerance_minutes = 10;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use anyhow::Result;
use chrono::Duration;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Thresholds used by the gate, the window validator and the classifier.
///
/// All values are in minutes. The defaults reproduce the behaviour users
/// know from the mobile app, so most installations never change them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Minimum time between `go_work` and `check_in`.
    pub go_work_gap_minutes: i64,

    /// Minimum time between `check_in` and `check_out`.
    pub check_in_gap_minutes: i64,

    /// Half-width of the accepted window around the configured start and
    /// end when validating a check-in or check-out.
    pub window_tolerance_minutes: i64,

    /// Lateness or early departure up to this many minutes is forgiven.
    pub grace_minutes: i64,

    /// Overtime shorter than this is not awarded.
    pub overtime_threshold_minutes: i64,

    /// A full `go_work → complete` cycle shorter than this is read as a
    /// "mark the day as worked" shortcut rather than real timestamps.
    pub quick_cycle_minutes: i64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            go_work_gap_minutes: 5,
            check_in_gap_minutes: 120,
            window_tolerance_minutes: 15,
            grace_minutes: 5,
            overtime_threshold_minutes: 30,
            quick_cycle_minutes: 5,
        }
    }
}

impl RulesConfig {
    pub fn go_work_gap(&self) -> Duration {
        Duration::minutes(self.go_work_gap_minutes)
    }

    pub fn check_in_gap(&self) -> Duration {
        Duration::minutes(self.check_in_gap_minutes)
    }

    pub fn window_tolerance(&self) -> Duration {
        Duration::minutes(self.window_tolerance_minutes)
    }

    pub fn grace(&self) -> Duration {
        Duration::minutes(self.grace_minutes)
    }

    pub fn overtime_threshold(&self) -> Duration {
        Duration::minutes(self.overtime_threshold_minutes)
    }

    pub fn quick_cycle(&self) -> Duration {
        Duration::minutes(self.quick_cycle_minutes)
    }
}

/// Main configuration container.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,

    /// Shift that new punches are validated and classified against.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub active_shift: Option<i64>,
}

impl Config {
    /// Reads configuration from the data directory, or returns defaults
    /// when no file has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON, replacing any
    /// previous file.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive wizard for the engine thresholds, pre-filled with the
    /// current values.
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;
        let rules = &config.rules;

        let go_work_gap_minutes = prompt_minutes(Message::PromptGoWorkGap, rules.go_work_gap_minutes)?;
        let check_in_gap_minutes = prompt_minutes(Message::PromptCheckInGap, rules.check_in_gap_minutes)?;
        let window_tolerance_minutes = prompt_minutes(Message::PromptWindowTolerance, rules.window_tolerance_minutes)?;
        let grace_minutes = prompt_minutes(Message::PromptGraceMinutes, rules.grace_minutes)?;
        let overtime_threshold_minutes = prompt_minutes(Message::PromptOvertimeThreshold, rules.overtime_threshold_minutes)?;
        let quick_cycle_minutes = prompt_minutes(Message::PromptQuickCycle, rules.quick_cycle_minutes)?;

        config.rules = RulesConfig {
            go_work_gap_minutes,
            check_in_gap_minutes,
            window_tolerance_minutes,
            grace_minutes,
            overtime_threshold_minutes,
            quick_cycle_minutes,
        };

        Ok(config)
    }
}

fn prompt_minutes(prompt: Message, current: i64) -> Result<i64> {
    let value = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(current)
        .validate_with(|input: &i64| -> Result<(), &str> {
            if *input >= 0 && *input <= 24 * 60 {
                Ok(())
            } else {
                Err("Minutes must be between 0 and 1440")
            }
        })
        .interact_text()?;
    Ok(value)
}
