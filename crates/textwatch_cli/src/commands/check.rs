//! Check command implementation

use miette::{IntoDiagnostic, Result};
use tracing::warn;

use textwatch_core::Linter;

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;

/// Checks the matching files. Returns true if anything was found or a file
/// could not be checked.
pub fn run_check(cli: &Cli, patterns: &[String], format: OutputFormat) -> Result<bool> {
    let root = cli.root();
    let linter = Linter::new(Some(root)).into_diagnostic()?;

    let (results, failures) = linter.lint_patterns(patterns, root).into_diagnostic()?;

    if !failures.is_empty() {
        warn!("{} file(s) could not be checked", failures.len());
        eprintln!("\n{} file(s) failed to check:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_findings = output_results(&results, format)?;
    Ok(has_findings || !failures.is_empty())
}
