//! Versioned schema migrations.
//!
//! Every migration runs once, inside the transaction that applies all
//! pending ones, and is recorded in the `migrations` table. New schema
//! changes are appended with the next version number; applied migrations
//! are never edited.
//!
//! ```rust,no_run
//! use shiftclock::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("shiftclock.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: shifts, punches and derived day statuses
        self.add_migration(1, "create_attendance_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS shifts (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE COLLATE NOCASE,
                    departure_time TEXT NOT NULL,
                    start_time TEXT NOT NULL,
                    office_end_time TEXT NOT NULL,
                    end_time TEXT NOT NULL,
                    remind_before_start INTEGER NOT NULL DEFAULT 15,
                    remind_after_end INTEGER NOT NULL DEFAULT 15,
                    days_applied TEXT NOT NULL,
                    show_sign_button BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            // shift_date is the day the shift started, which differs from
            // the timestamp's date for the morning half of overnight shifts
            tx.execute(
                "CREATE TABLE IF NOT EXISTS attendance_events (
                    id INTEGER PRIMARY KEY,
                    shift_date DATE NOT NULL,
                    action TEXT NOT NULL,
                    timestamp TEXT NOT NULL
                )",
                [],
            )?;
            tx.execute(
                "CREATE INDEX IF NOT EXISTS idx_attendance_events_shift_date ON attendance_events(shift_date)",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS day_statuses (
                    date DATE PRIMARY KEY,
                    status TEXT NOT NULL,
                    total_work_time REAL NOT NULL DEFAULT 0,
                    overtime REAL NOT NULL DEFAULT 0,
                    remarks TEXT NOT NULL DEFAULT '',
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: manual day status picks
        self.add_migration(2, "add_status_override", |tx| {
            tx.execute("ALTER TABLE day_statuses ADD COLUMN override_status TEXT", [])?;
            Ok(())
        });

        // Version 3: reminder notes and their shift links
        self.add_migration(3, "add_notes", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS notes (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    content TEXT NOT NULL,
                    reminder_time TEXT,
                    explicit_reminder_days TEXT NOT NULL DEFAULT '',
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    UNIQUE (title, content)
                )",
                [],
            )?;
            tx.execute(
                "CREATE TABLE IF NOT EXISTS note_shifts (
                    note_id INTEGER NOT NULL,
                    shift_id INTEGER NOT NULL,
                    PRIMARY KEY (note_id, shift_id),
                    FOREIGN KEY (note_id) REFERENCES notes(id) ON DELETE CASCADE,
                    FOREIGN KEY (shift_id) REFERENCES shifts(id) ON DELETE CASCADE
                )",
                [],
            )?;
            Ok(())
        });

        // Version 4: regular hours stored apart from the total, which also
        // holds overtime below the threshold
        self.add_migration(4, "add_regular_hours", |tx| {
            tx.execute(
                "ALTER TABLE day_statuses ADD COLUMN regular_hours REAL NOT NULL DEFAULT 0",
                [],
            )?;
            tx.execute("UPDATE day_statuses SET regular_hours = total_work_time - overtime", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String)>> {
        let mut stmt = conn.prepare("SELECT version, name FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
