//! `workspace/executeCommand` handlers.
//!
//! Both commands change the workspace settings file. On success every open
//! document is validated again by the caller.

use std::collections::HashMap;

use serde_json::Value;
use tower_lsp::Client;
use tower_lsp::lsp_types::{ExecuteCommandParams, MessageActionItem, MessageType};
use tracing::{debug, error, info};

use textwatch_core::{Severity, SettingsError, SettingsStore};

use crate::state::BackendState;

/// Adds, removes or lists custom text components.
///
/// Arguments are `["add", "A, B"]`, `["remove", "A", "B", ...]` or
/// `["list"]`. A remove with explicit names drops all of them at once. A bare
/// `["remove"]` asks the user through `window/showMessageRequest`, which
/// offers a single choice, so that path removes one component per call.
pub const MANAGE_COMPONENTS_COMMAND: &str = "react-native-text-watcher.manageCustomTextComponents";

/// Changes the severity of every finding.
pub const CHANGE_SEVERITY_COMMAND: &str = "react-native-text-watcher.changeSeverityType";

/// Commands advertised in the server capabilities.
pub const COMMANDS: [&str; 2] = [MANAGE_COMPONENTS_COMMAND, CHANGE_SEVERITY_COMMAND];

const NO_WORKSPACE: &str = "No workspace folder open.";
const MANAGE_FAILED: &str = "Failed to manage custom text components";
const ADDED: &str = "Successfully Added, You will no longer see warnings for these components.";
const PICK_COMPONENT: &str = "Select a Component to Remove";
const PICK_SEVERITY: &str = "Select a New Severity Type";

/// A parsed `manageCustomTextComponents` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentAction {
    /// Comma-separated names to add.
    Add(String),
    /// Names to remove; empty means "ask the user" for a single one.
    Remove(Vec<String>),
    /// Report the allowlist.
    List,
}

impl ComponentAction {
    /// Parses the command arguments: `["add", "A, B"]`, `["remove", "A", ...]`
    /// or `["list"]`.
    pub fn from_arguments(arguments: &[Value]) -> Result<Self, String> {
        let mut strings = arguments.iter().filter_map(Value::as_str);
        match strings.next() {
            Some("add") => Ok(Self::Add(strings.next().unwrap_or_default().to_string())),
            Some("remove") => Ok(Self::Remove(
                strings
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            Some("list") => Ok(Self::List),
            Some(other) => Err(format!(
                "{MANAGE_FAILED}: unknown action \"{other}\", expected add, remove or list"
            )),
            None => Err(format!(
                "{MANAGE_FAILED}: missing action, expected add, remove or list"
            )),
        }
    }
}

/// What an executed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Settings changed; the message is shown as information.
    Updated(String),
    /// The current allowlist, custom names first.
    Listed(Vec<String>),
    /// The user dismissed a picker.
    Cancelled,
    /// Nothing was written; the message is shown as an error.
    Failed(String),
}

/// Handles the `workspace/executeCommand` request.
pub async fn handle_execute_command(
    state: &BackendState,
    client: &Client,
    params: ExecuteCommandParams,
) -> CommandOutcome {
    debug!("Execute command: {} {:?}", params.command, params.arguments);

    let Some(store) = state.settings_store() else {
        return CommandOutcome::Failed(NO_WORKSPACE.to_string());
    };

    match params.command.as_str() {
        MANAGE_COMPONENTS_COMMAND => {
            let action = match ComponentAction::from_arguments(&params.arguments) {
                Ok(action) => action,
                Err(message) => return CommandOutcome::Failed(message),
            };
            let action = match action {
                ComponentAction::Remove(names) if names.is_empty() => {
                    match pick_component(&store, client).await {
                        Ok(Some(name)) => ComponentAction::Remove(vec![name]),
                        Ok(None) => return CommandOutcome::Cancelled,
                        Err(e) => return CommandOutcome::Failed(e.to_string()),
                    }
                }
                action => action,
            };
            manage_components(&store, action)
        }
        CHANGE_SEVERITY_COMMAND => {
            let name = match params.arguments.first().and_then(Value::as_str) {
                Some(name) => name.to_string(),
                None => match pick_severity(client).await {
                    Some(name) => name,
                    None => return CommandOutcome::Cancelled,
                },
            };
            change_severity(&store, &name)
        }
        other => CommandOutcome::Failed(format!("Unknown command: {other}")),
    }
}

/// Applies a component action to the settings file.
pub fn manage_components(store: &SettingsStore, action: ComponentAction) -> CommandOutcome {
    match action {
        ComponentAction::Add(input) => match store.add_components(&input) {
            Ok(added) => {
                info!("Added custom text components: {}", added.join(", "));
                CommandOutcome::Updated(ADDED.to_string())
            }
            Err(e) => failed(e),
        },
        ComponentAction::Remove(names) => match store.remove_components(&names) {
            Ok(()) => {
                info!("Removed custom text components: {}", names.join(", "));
                CommandOutcome::Updated(format!(
                    "Removed \"{}\", You'll now see warnings for this component.",
                    names.join(",")
                ))
            }
            Err(e) => failed(e),
        },
        ComponentAction::List => CommandOutcome::Listed(
            store
                .load()
                .allowlist
                .iter()
                .map(str::to_string)
                .collect(),
        ),
    }
}

/// Stores the severity named `name`.
pub fn change_severity(store: &SettingsStore, name: &str) -> CommandOutcome {
    let severity = match name.parse::<Severity>() {
        Ok(severity) => severity,
        Err(e) => return CommandOutcome::Failed(e.to_string()),
    };
    match store.set_severity(severity) {
        Ok(()) => {
            info!("Severity changed to {}", severity);
            CommandOutcome::Updated(format!(
                "Successfully Updated Severity Type to {severity}."
            ))
        }
        Err(e) => failed(e),
    }
}

fn failed(e: SettingsError) -> CommandOutcome {
    error!("Settings update failed: {}", e);
    CommandOutcome::Failed(e.to_string())
}

/// Asks the user which configured component to remove. Only one can be
/// picked per request.
async fn pick_component(
    store: &SettingsStore,
    client: &Client,
) -> Result<Option<String>, SettingsError> {
    let custom = store.load().allowlist.custom().to_vec();
    if custom.is_empty() {
        return Err(SettingsError::NothingToRemove);
    }
    Ok(pick(client, PICK_COMPONENT, custom).await)
}

async fn pick_severity(client: &Client) -> Option<String> {
    let names = Severity::ALL.iter().map(|s| s.as_str().to_string()).collect();
    pick(client, PICK_SEVERITY, names).await
}

/// Shows a `window/showMessageRequest` and returns the chosen title.
async fn pick(client: &Client, message: &str, titles: Vec<String>) -> Option<String> {
    let actions = titles
        .into_iter()
        .map(|title| MessageActionItem {
            title,
            properties: HashMap::new(),
        })
        .collect();

    match client
        .show_message_request(MessageType::INFO, message, Some(actions))
        .await
    {
        Ok(choice) => choice.map(|item| item.title),
        Err(e) => {
            error!("Message request failed: {}", e);
            None
        }
    }
}
