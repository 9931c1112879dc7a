//! Components command implementation

use miette::{IntoDiagnostic, Result};
use tracing::info;

use textwatch_core::SettingsStore;

use crate::cli::{Cli, ComponentsCommands};

pub fn run_components(cli: &Cli, command: &ComponentsCommands) -> Result<()> {
    let store = SettingsStore::for_root(cli.root());

    match command {
        ComponentsCommands::Add { names } => {
            let added = store.add_components(names).into_diagnostic()?;
            info!("Updated {}", store.path().display());
            println!("Added {}", added.join(", "));
        }
        ComponentsCommands::Remove { names } => {
            store.remove_components(names).into_diagnostic()?;
            info!("Updated {}", store.path().display());
            println!("Removed {}", names.join(", "));
        }
        ComponentsCommands::List => {
            for name in store.load().allowlist.iter() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
