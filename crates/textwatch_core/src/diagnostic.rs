//! Diagnostics produced for naked text.

use serde::Serialize;
use textwatch_ast::{Range, Span};

use crate::extractor::NakedTextMatch;
use crate::severity::Severity;

/// Name reported as the source of every diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "textwatch";

/// Code attached to every diagnostic.
pub const DIAGNOSTIC_CODE: &str = "naked-text";

/// Longest text quoted in a message before it is cut.
pub const MAX_QUOTED_CHARS: usize = 60;

/// A naked text finding, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The full trimmed text.
    pub text: String,
    /// Range of the full trimmed text.
    pub range: Range,
    /// Byte span of the full trimmed text.
    pub span: Span,
    /// Human readable message.
    pub message: String,
    /// Severity of the finding.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates a diagnostic for a match.
    pub fn new(found: NakedTextMatch, severity: Severity) -> Self {
        let message = format_message(&found.text);
        Self {
            text: found.text,
            range: found.range,
            span: found.span,
            message,
            severity,
        }
    }
}

/// Formats the message for `text`, quoting at most [`MAX_QUOTED_CHARS`]
/// characters.
pub fn format_message(text: &str) -> String {
    let quoted = match text.char_indices().nth(MAX_QUOTED_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    };
    format!(
        "Text string \"{quoted}\" must be rendered within a <Text/> or one of your custom text components."
    )
}
