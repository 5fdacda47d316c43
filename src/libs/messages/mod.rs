//! Centralized user-facing messages.
//!
//! Text is defined once as a [`Message`] variant and rendered through its
//! `Display` implementation. The `msg_*` macros in [`macros`] print messages
//! with the right prefix and route them to `tracing` in debug mode.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
