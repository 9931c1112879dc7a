//! Output formatting module

mod json;
mod text;

use miette::Result;
use textwatch_core::LintResult;

use crate::cli::OutputFormat;

/// Prints the results. Returns true if any file has findings.
pub fn output_results(results: &[LintResult], format: OutputFormat) -> Result<bool> {
    let has_findings = results.iter().any(|r| r.has_diagnostics());

    match format {
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_findings)
}
