//! # textwatch_core
//!
//! Core naked-text checker for textwatch.
//!
//! This crate provides:
//! - The classifier deciding whether a syntax node is bare text
//! - The tree walker collecting bare text with trimmed ranges
//! - The component allowlist and the workspace settings store
//! - The main `Linter` orchestrator, with file discovery and parallel checks
//!
//! ## Example
//!
//! ```rust
//! use textwatch_core::Linter;
//! use textwatch_core::Dialect;
//!
//! let linter = Linter::new(None).unwrap();
//! let diagnostics = linter
//!     .lint_content("const A = () => <View><Text>Hello</Text>World</View>;", Dialect::Tsx)
//!     .unwrap();
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].text, "World");
//! ```

mod allowlist;
pub mod classifier;
pub mod component_name;
mod diagnostic;
mod error;
pub mod extractor;
pub mod file_finder;
mod linter;
pub mod locate;
pub mod settings;
mod severity;

pub use allowlist::{ComponentAllowlist, DEFAULT_TEXT_COMPONENT};
pub use component_name::ComponentNameError;
pub use diagnostic::{
    DIAGNOSTIC_CODE, DIAGNOSTIC_SOURCE, Diagnostic, MAX_QUOTED_CHARS, format_message,
};
pub use error::LinterError;
pub use extractor::{NakedTextMatch, extract_naked_texts};
pub use linter::{LintFilesResult, LintResult, Linter};
pub use settings::{Settings, SettingsError, SettingsStore};
pub use severity::{Severity, UnknownSeverity};

pub use textwatch_ast::{Position, Range, Span};
pub use textwatch_parser::Dialect;
