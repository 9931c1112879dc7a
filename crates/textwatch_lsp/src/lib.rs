//! textwatch LSP Server
//!
//! Language Server Protocol implementation for textwatch.
//! Flags naked text in React Native JSX/TSX documents while they are edited.

mod config;
mod conversion;
mod handler;
mod state;

use std::sync::Arc;

use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info};

use textwatch_core::{Diagnostic as TextwatchDiagnostic, Linter};
use textwatch_parser::Dialect;

use crate::conversion::to_lsp_diagnostic;
use crate::handler::CommandOutcome;
use crate::state::{BackendState, SharedState};

pub use config::ParserLoader;
pub use handler::{CHANGE_SEVERITY_COMMAND, COMMANDS, MANAGE_COMPONENTS_COMMAND};

/// The LSP backend for textwatch.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    ///
    /// The linter is created during `initialize`, once the workspace root is
    /// known.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Creates a backend whose linter is built on the parser returned by
    /// `parser_loader`. A loader error disables validation for the session.
    pub fn with_parser_loader(client: Client, parser_loader: ParserLoader) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::with_parser_loader(parser_loader)),
        }
    }

    /// Runs one pass over a document and publishes its diagnostics.
    ///
    /// The result is dropped if a newer pass started or the document was
    /// closed in the meantime.
    async fn validate_document(&self, uri: &Url) {
        let Some(linter) = self.state.linter() else {
            debug!("Linter not available, skipping validation of {}", uri);
            return;
        };
        let Some(ticket) = self.state.begin_pass(uri) else {
            return;
        };
        debug!("Validating document: {} (generation {})", uri, ticket.generation);

        let Some(diagnostics) = lint_text(linter, ticket.text, ticket.dialect).await else {
            return;
        };
        let lsp_diagnostics: Vec<Diagnostic> = diagnostics.iter().map(to_lsp_diagnostic).collect();

        let _publish = self.state.publish_lock.lock().await;
        if !self.state.is_current(uri, ticket.generation) {
            debug!("Discarding stale diagnostics for {}", uri);
            return;
        }
        self.client
            .publish_diagnostics(uri.clone(), lsp_diagnostics, Some(ticket.version))
            .await;
    }

    /// Validates every open document again.
    async fn validate_open_documents(&self) {
        for uri in self.state.open_documents() {
            self.validate_document(&uri).await;
        }
    }
}

/// Lints text on the blocking pool so the server keeps answering.
async fn lint_text(
    linter: Arc<Linter>,
    text: String,
    dialect: Dialect,
) -> Option<Vec<TextwatchDiagnostic>> {
    match tokio::task::spawn_blocking(move || linter.lint_content(&text, dialect)).await {
        Ok(Ok(diagnostics)) => Some(diagnostics),
        Ok(Err(e)) => {
            error!("Lint error: {}", e);
            None
        }
        Err(e) => {
            error!("Lint task failed: {}", e);
            None
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.state, &self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        if let Some(uri) = handler::handle_did_open(&self.state, params).await {
            self.validate_document(&uri).await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(uri) = handler::handle_did_change(&self.state, params).await {
            self.validate_document(&uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if let Some(uri) = handler::handle_did_save(&self.state, params).await {
            self.validate_document(&uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = handler::handle_did_close(&self.state, params).await;

        let _publish = self.state.publish_lock.lock().await;
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        if handler::handle_did_change_watched_files(params).await {
            self.validate_open_documents().await;
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        match handler::handle_execute_command(&self.state, &self.client, params).await {
            CommandOutcome::Updated(message) => {
                self.client.show_message(MessageType::INFO, message).await;
                self.validate_open_documents().await;
                Ok(None)
            }
            CommandOutcome::Listed(names) => {
                self.client
                    .show_message(
                        MessageType::INFO,
                        format!("Text components: {}", names.join(", ")),
                    )
                    .await;
                Ok(Some(Value::from(names)))
            }
            CommandOutcome::Cancelled => Ok(None),
            CommandOutcome::Failed(message) => {
                self.client.show_message(MessageType::ERROR, message).await;
                Ok(None)
            }
        }
    }
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("textwatch LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
