//! LSP type conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use textwatch_core::{
    DIAGNOSTIC_CODE, DIAGNOSTIC_SOURCE, Diagnostic as TextwatchDiagnostic,
    Severity as TextwatchSeverity,
};

/// Converts a textwatch diagnostic to an LSP diagnostic.
pub fn to_lsp_diagnostic(diag: &TextwatchDiagnostic) -> Diagnostic {
    Diagnostic {
        range: to_lsp_range(diag.range),
        severity: Some(to_lsp_severity(diag.severity)),
        code: Some(NumberOrString::String(DIAGNOSTIC_CODE.to_string())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diag.message.clone(),
        ..Default::default()
    }
}

/// Maps a severity onto the LSP scale.
pub fn to_lsp_severity(severity: TextwatchSeverity) -> DiagnosticSeverity {
    match severity {
        TextwatchSeverity::Error => DiagnosticSeverity::ERROR,
        TextwatchSeverity::Warning => DiagnosticSeverity::WARNING,
        TextwatchSeverity::Information => DiagnosticSeverity::INFORMATION,
        TextwatchSeverity::Hint => DiagnosticSeverity::HINT,
    }
}

/// Converts a range. Both sides count characters in UTF-16 code units.
pub fn to_lsp_range(range: textwatch_core::Range) -> Range {
    Range::new(
        Position::new(range.start.line, range.start.character),
        Position::new(range.end.line, range.end.character),
    )
}
