//! Initialize and shutdown handlers.

use serde_json::json;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{error, info};

use crate::config::init_linter;
use crate::handler::commands::COMMANDS;
use crate::state::BackendState;
use textwatch_core::settings::{SETTINGS_DIR, SETTINGS_FILE};

/// Registration id of the settings file watcher.
const SETTINGS_WATCHER_ID: &str = "textwatch-settings-watcher";

/// Handles the `initialize` LSP request.
pub async fn handle_initialize(
    state: &BackendState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("textwatch LSP server initializing...");

    let dynamic_watch = params
        .capabilities
        .workspace
        .as_ref()
        .and_then(|ws| ws.did_change_watched_files.as_ref())
        .and_then(|caps| caps.dynamic_registration)
        .unwrap_or(false);
    match state.can_watch_files.write() {
        Ok(mut flag) => *flag = dynamic_watch,
        Err(e) => error!("Watch capability lock poisoned: {}", e),
    }

    let root_uri = params.root_uri.or_else(|| {
        params
            .workspace_folders
            .and_then(|folders| folders.into_iter().next())
            .map(|folder| folder.uri)
    });
    if let Some(path) = root_uri.and_then(|u| u.to_file_path().ok()) {
        match state.workspace_root.write() {
            Ok(mut root) => {
                *root = Some(path);
            }
            Err(e) => {
                error!("Workspace root lock poisoned: {}", e);
                return Ok(InitializeResult::default());
            }
        }
    }

    init_linter(state);

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                        include_text: Some(true),
                    })),
                    ..Default::default()
                },
            )),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "textwatch-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handles the `initialized` LSP notification.
///
/// Reports a startup failure once and asks the client to watch the settings
/// file when it supports dynamic registration.
pub async fn handle_initialized(state: &BackendState, client: &tower_lsp::Client) {
    client
        .log_message(MessageType::INFO, "textwatch LSP server initialized!")
        .await;

    let startup_error = match state.startup_error.read() {
        Ok(slot) => slot.clone(),
        Err(e) => {
            error!("Startup error lock poisoned: {}", e);
            None
        }
    };
    if let Some(message) = startup_error {
        client.show_message(MessageType::ERROR, message).await;
    }

    let can_watch = state.can_watch_files.read().map(|flag| *flag).unwrap_or(false);
    if can_watch {
        // Registration waits on a client response.
        let client = client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.register_capability(vec![settings_watcher()]).await {
                error!("Failed to register settings watcher: {}", e);
            }
        });
    }
}

/// Handles the `shutdown` LSP request.
pub async fn handle_shutdown() -> Result<()> {
    info!("textwatch LSP server shutting down...");
    Ok(())
}

fn settings_watcher() -> Registration {
    Registration {
        id: SETTINGS_WATCHER_ID.to_string(),
        method: "workspace/didChangeWatchedFiles".to_string(),
        register_options: Some(json!({
            "watchers": [
                { "globPattern": format!("**/{SETTINGS_DIR}/{SETTINGS_FILE}") }
            ]
        })),
    }
}
