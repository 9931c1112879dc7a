//! Subcommand implementations

mod check;
mod components;
mod lsp;
mod severity;

pub use check::run_check;
pub use components::run_components;
pub use lsp::run_lsp;
pub use severity::run_severity;
