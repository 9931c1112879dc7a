//! CLI argument definitions

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

/// textwatch - find text rendered outside <Text/> in React Native code
#[derive(Parser)]
#[command(name = "textwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root holding .vscode/settings.json [default: current directory]
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the workspace root.
    pub fn root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("."))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check JSX/TSX files for naked text
    Check {
        /// File patterns to check, relative to the root [default: **/*.jsx **/*.tsx]
        patterns: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Start the LSP server
    Lsp,

    /// Manage custom text components
    Components {
        #[command(subcommand)]
        command: ComponentsCommands,
    },

    /// Show or change the severity of findings
    Severity {
        /// New severity (Error, Warning, Information, Hint)
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ComponentsCommands {
    /// Add components that may render text
    Add {
        /// Comma-separated component names, e.g. "Label, Title"
        names: String,
    },

    /// Remove custom components
    Remove {
        /// Component names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List the components that may render text
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
