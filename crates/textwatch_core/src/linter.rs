//! Core linter engine.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use textwatch_parser::{Dialect, Parser, TreeSitterParser};

use crate::diagnostic::Diagnostic;
use crate::extractor::extract_naked_texts;
use crate::file_finder::{DEFAULT_PATTERNS, FileFinder};
use crate::settings::{Settings, SettingsStore};
use crate::LinterError;

/// Result type for lint_files and lint_patterns methods.
///
/// Contains a tuple of:
/// - Successful lint results
/// - Failed files with their errors (path and error)
pub type LintFilesResult = Result<(Vec<LintResult>, Vec<(PathBuf, LinterError)>), LinterError>;

/// Diagnostics found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    /// Path of the checked file.
    pub path: PathBuf,
    /// Findings, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    /// Returns true if the file has findings.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// The core linter engine.
///
/// Holds the parser and, when a workspace root is known, the settings store.
/// Every pass reads settings afresh, so edits to the settings file take effect
/// on the next pass without restarting.
pub struct Linter {
    parser: Arc<dyn Parser>,
    settings: Option<SettingsStore>,
}

impl Linter {
    /// Creates a linter backed by the built-in tree-sitter parser.
    ///
    /// Without a `root`, the default settings are used.
    pub fn new(root: Option<&Path>) -> Result<Self, LinterError> {
        let parser = TreeSitterParser::new()?;
        Ok(Self::with_parser(Arc::new(parser), root))
    }

    /// Creates a linter with a custom parser.
    pub fn with_parser(parser: Arc<dyn Parser>, root: Option<&Path>) -> Self {
        Self {
            parser,
            settings: root.map(SettingsStore::for_root),
        }
    }

    /// Returns the settings store, if a workspace root was given.
    pub fn settings_store(&self) -> Option<&SettingsStore> {
        self.settings.as_ref()
    }

    /// Loads the current settings.
    pub fn load_settings(&self) -> Settings {
        self.settings
            .as_ref()
            .map(SettingsStore::load)
            .unwrap_or_default()
    }

    /// Lints a source buffer with freshly loaded settings.
    pub fn lint_content(
        &self,
        content: &str,
        dialect: Dialect,
    ) -> Result<Vec<Diagnostic>, LinterError> {
        let settings = self.load_settings();
        self.lint_with_settings(content, dialect, &settings)
    }

    /// Lints a source buffer with the given settings.
    pub fn lint_with_settings(
        &self,
        content: &str,
        dialect: Dialect,
        settings: &Settings,
    ) -> Result<Vec<Diagnostic>, LinterError> {
        let matches = extract_naked_texts(self.parser.as_ref(), content, dialect, &settings.allowlist)?;
        debug!("Found {} naked text literals", matches.len());

        Ok(matches
            .into_iter()
            .map(|found| Diagnostic::new(found, settings.severity))
            .collect())
    }

    /// Lints a single file.
    pub fn lint_file(&self, path: &Path, settings: &Settings) -> Result<LintResult, LinterError> {
        let dialect = Dialect::from_path(path).ok_or_else(|| {
            LinterError::file(format!("Unsupported file type: {}", path.display()))
        })?;

        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

        let diagnostics = self.lint_with_settings(&content, dialect, settings)?;

        Ok(LintResult {
            path: path.to_path_buf(),
            diagnostics,
        })
    }

    /// Lints files matching the given patterns below `base_dir`.
    ///
    /// With no patterns, every `.jsx` and `.tsx` file is checked.
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_patterns(&self, patterns: &[String], base_dir: &Path) -> LintFilesResult {
        let finder = FileFinder::new(&[], &[])?;
        let files = if patterns.is_empty() {
            let defaults: Vec<String> = DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect();
            finder.discover_files(&defaults, base_dir)?
        } else {
            finder.discover_files(patterns, base_dir)?
        };
        self.lint_files(&files)
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// Settings are loaded once for the whole batch. A fatal error (the parser
    /// cannot work at all) fails the whole call; other errors are reported
    /// per file.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        let settings = self.load_settings();

        let results: Vec<Result<LintResult, (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| {
                self.lint_file(path, &settings)
                    .map_err(|e| (path.clone(), e))
            })
            .collect();

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(lint_result) => successes.push(lint_result),
                Err(failure) => failures.push(failure),
            }
        }

        if let Some(index) = failures.iter().position(|(_, e)| e.is_fatal()) {
            let (_, fatal) = failures.swap_remove(index);
            return Err(fatal);
        }

        info!(
            "Checked {} files ({} failed)",
            successes.len(),
            failures.len()
        );
        Ok((successes, failures))
    }
}
