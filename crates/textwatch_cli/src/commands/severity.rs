//! Severity command implementation

use miette::{IntoDiagnostic, Result};
use tracing::info;

use textwatch_core::{Severity, SettingsStore};

use crate::cli::Cli;

/// Prints the current severity, or stores `name` when given.
pub fn run_severity(cli: &Cli, name: Option<&str>) -> Result<()> {
    let store = SettingsStore::for_root(cli.root());

    match name {
        Some(name) => {
            let severity: Severity = name.parse().into_diagnostic()?;
            store.set_severity(severity).into_diagnostic()?;
            info!("Updated {}", store.path().display());
            println!("Severity set to {severity}");
        }
        None => println!("{}", store.load().severity),
    }

    Ok(())
}
