//! LSP request/notification handlers.

pub(crate) mod commands;
mod documents;
mod files;
mod initialize;

pub use commands::{CHANGE_SEVERITY_COMMAND, COMMANDS, MANAGE_COMPONENTS_COMMAND};
pub(crate) use commands::{CommandOutcome, handle_execute_command};
pub(crate) use documents::{handle_did_change, handle_did_close, handle_did_open, handle_did_save};
pub(crate) use files::handle_did_change_watched_files;
pub(crate) use initialize::{handle_initialize, handle_initialized, handle_shutdown};
