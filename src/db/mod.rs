//! Persistence for shiftclock.
//!
//! SQLite through `rusqlite`, one database file in the platform data
//! directory, schema evolved by versioned migrations. [`store::Store`] is the
//! production [`AttendanceStore`](crate::libs::store::AttendanceStore);
//! [`memory::MemoryStore`] implements the same contract without a database.
//!
//! ```rust,no_run
//! use shiftclock::db::store::Store;
//! use shiftclock::libs::store::AttendanceStore;
//!
//! let mut store = Store::new()?;
//! let shifts = store.load_shifts()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup and migration on open.
pub mod db;

/// In-memory store for tests and embedding.
pub mod memory;

/// Versioned schema changes.
pub mod migrations;

/// SQLite-backed store.
pub mod store;
