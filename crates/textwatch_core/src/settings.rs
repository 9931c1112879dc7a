//! Workspace settings store.
//!
//! Settings live in `<root>/.vscode/settings.json` under two keys shared with
//! the editor extension:
//!
//! ```json
//! {
//!   "react-native-text-watcher.customTextComponents": ["MyText", "Label"],
//!   "react-native-text-watcher.severityType": "Error"
//! }
//! ```
//!
//! Reads are tolerant: a missing or malformed file yields defaults. Writes are
//! strict: they keep every unrelated key and never overwrite a file they could
//! not parse.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::allowlist::{ComponentAllowlist, DEFAULT_TEXT_COMPONENT};
use crate::component_name::{ComponentNameError, has_valid_start, parse_component_list};
use crate::severity::Severity;

/// Directory holding the settings file, relative to the workspace root.
pub const SETTINGS_DIR: &str = ".vscode";

/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.json";

/// Key of the custom text component list.
pub const CUSTOM_COMPONENTS_KEY: &str = "react-native-text-watcher.customTextComponents";

/// Key of the severity name.
pub const SEVERITY_KEY: &str = "react-native-text-watcher.severityType";

/// Errors raised when changing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Settings file {} is not valid JSON: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Settings file {} must contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error(transparent)]
    InvalidComponent(#[from] ComponentNameError),

    #[error("No custom text components to remove.")]
    NothingToRemove,

    #[error("Component \"{0}\" is not a custom text component")]
    UnknownComponent(String),
}

/// Decoded settings, each field defaulting independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Components that may contain raw text.
    pub allowlist: ComponentAllowlist,
    /// Severity of every finding.
    pub severity: Severity,
}

impl Settings {
    /// Decodes settings from a parsed settings document.
    ///
    /// Anything that is not a JSON object decodes to the defaults.
    pub fn from_value(value: &Value) -> Self {
        Self {
            allowlist: decode_components(value.get(CUSTOM_COMPONENTS_KEY)),
            severity: decode_severity(value.get(SEVERITY_KEY)),
        }
    }
}

fn decode_components(value: Option<&Value>) -> ComponentAllowlist {
    let Some(Value::Array(items)) = value else {
        return ComponentAllowlist::default();
    };

    let names: Vec<&str> = items
        .iter()
        .filter_map(Value::as_str)
        .filter(|name| !name.is_empty())
        .collect();

    // One bad entry discards the whole list.
    if let Some(bad) = names.iter().find(|name| !has_valid_start(name)) {
        debug!("Ignoring custom text components, invalid entry {:?}", bad);
        return ComponentAllowlist::default();
    }

    ComponentAllowlist::new(names)
}

fn decode_severity(value: Option<&Value>) -> Severity {
    value
        .and_then(Value::as_str)
        .and_then(|name| name.parse().ok())
        .unwrap_or_default()
}

/// Reads and writes the settings file of one workspace root.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store for the workspace rooted at `root`.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(SETTINGS_DIR).join(SETTINGS_FILE),
        }
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the current settings.
    ///
    /// Never fails: a missing file, an unreadable file or a malformed body all
    /// produce defaults.
    pub fn load(&self) -> Settings {
        match self.read_document() {
            Ok(Some(document)) => Settings::from_value(&Value::Object(document)),
            Ok(None) => Settings::default(),
            Err(e) => {
                debug!("Using default settings: {}", e);
                Settings::default()
            }
        }
    }

    /// Stores a new severity.
    pub fn set_severity(&self, severity: Severity) -> Result<(), SettingsError> {
        self.update(|document| {
            document.insert(
                SEVERITY_KEY.to_string(),
                Value::String(severity.as_str().to_string()),
            );
        })?;
        info!("Severity type set to {}", severity);
        Ok(())
    }

    /// Validates a comma-separated list of new components and stores them.
    ///
    /// New names are stored before the already configured ones. Returns the
    /// names that were added.
    pub fn add_components(&self, input: &str) -> Result<Vec<String>, SettingsError> {
        let current = self.load().allowlist;
        let added = parse_component_list(input, &current)?;

        let stored: Vec<Value> = added
            .iter()
            .chain(current.custom())
            .map(|name| Value::String(name.clone()))
            .collect();

        self.update(|document| {
            document.insert(CUSTOM_COMPONENTS_KEY.to_string(), Value::Array(stored));
        })?;
        info!("Added custom text components: {}", added.join(", "));
        Ok(added)
    }

    /// Removes components from the custom list.
    ///
    /// Fails with [`SettingsError::NothingToRemove`] when no custom component
    /// is configured, and with [`SettingsError::UnknownComponent`] when a
    /// name is not in the list. Nothing is written on failure.
    pub fn remove_components(&self, names: &[String]) -> Result<(), SettingsError> {
        let current = self.load().allowlist;
        if current.custom().is_empty() {
            return Err(SettingsError::NothingToRemove);
        }

        if let Some(unknown) = names
            .iter()
            .find(|name| name.as_str() == DEFAULT_TEXT_COMPONENT || !current.contains(name))
        {
            return Err(SettingsError::UnknownComponent(unknown.clone()));
        }

        let remaining: Vec<Value> = current
            .custom()
            .iter()
            .filter(|name| !names.contains(*name))
            .map(|name| Value::String(name.clone()))
            .collect();

        self.update(|document| {
            document.insert(CUSTOM_COMPONENTS_KEY.to_string(), Value::Array(remaining));
        })?;
        info!("Removed custom text components: {}", names.join(", "));
        Ok(())
    }

    /// Reads the settings document. `Ok(None)` means the file does not exist.
    fn read_document(&self) -> Result<Option<Map<String, Value>>, SettingsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
            .map_err(|e| SettingsError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        match value {
            // An empty file is an empty document.
            None => Ok(Some(Map::new())),
            Some(Value::Object(document)) => Ok(Some(document)),
            Some(_) => Err(SettingsError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }

    /// Applies `edit` to the current document and writes it back atomically.
    fn update(&self, edit: impl FnOnce(&mut Map<String, Value>)) -> Result<(), SettingsError> {
        let mut document = self.read_document()?.unwrap_or_default();
        edit(&mut document);
        self.write_document(&document)
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), SettingsError> {
        let write_error = |source: io::Error| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .ok_or_else(|| write_error(io::Error::other("settings path has no parent")))?;
        fs::create_dir_all(dir).map_err(write_error)?;

        let body = serde_json::to_string_pretty(document).map_err(|e| write_error(e.into()))?;

        let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(body.as_bytes()).map_err(write_error)?;
        file.persist(&self.path)
            .map_err(|e| write_error(e.error))?;

        debug!("Wrote {}", self.path.display());
        Ok(())
    }
}
