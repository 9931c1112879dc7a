//! Text output formatter

use textwatch_core::{Diagnostic, LintResult};

pub fn output_text(results: &[LintResult]) {
    for result in results {
        for diag in &result.diagnostics {
            println!("{}:{}", result.path.display(), format_diagnostic(diag));
        }
    }

    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.diagnostics.len()).sum();

    println!();
    println!("Checked {} files, found {} issues", total_files, total_issues);
}

/// Formats `line:col severity: message`, with one-based line and column.
///
/// The column counts UTF-16 code units, the unit LSP clients and VS Code use
/// for columns, so a location can be pasted into the editor's go-to-line as
/// is. It differs from the character count only after astral-plane
/// characters such as emoji.
fn format_diagnostic(diag: &Diagnostic) -> String {
    format!(
        "{}:{} {}: {}",
        diag.range.start.line + 1,
        diag.range.start.character + 1,
        diag.severity.label(),
        diag.message
    )
}
