//! Document lifecycle handlers (open, change, save, close).
//!
//! Only `javascriptreact` and `typescriptreact` documents are tracked; each
//! handler returns the URI to validate, if any.

use tower_lsp::lsp_types::*;
use tracing::debug;

use textwatch_parser::Dialect;

use crate::state::SharedState;

/// Handles the `textDocument/didOpen` notification.
pub async fn handle_did_open(state: &SharedState, params: DidOpenTextDocumentParams) -> Option<Url> {
    let doc = params.text_document;
    debug!("Document opened: {} ({})", doc.uri, doc.language_id);

    let Some(dialect) = Dialect::from_language_id(&doc.language_id) else {
        debug!("Ignoring document with language id {}", doc.language_id);
        return None;
    };

    state.upsert_document(doc.uri.clone(), doc.text, doc.version, dialect);
    Some(doc.uri)
}

/// Handles the `textDocument/didChange` notification.
pub async fn handle_did_change(
    state: &SharedState,
    params: DidChangeTextDocumentParams,
) -> Option<Url> {
    debug!("Document changed: {}", params.text_document.uri);

    // Full sync: the last change carries the whole text.
    let change = params.content_changes.into_iter().last()?;
    let uri = params.text_document.uri;

    state
        .update_text(&uri, change.text, Some(params.text_document.version))
        .then_some(uri)
}

/// Handles the `textDocument/didSave` notification.
pub async fn handle_did_save(state: &SharedState, params: DidSaveTextDocumentParams) -> Option<Url> {
    debug!("Document saved: {}", params.text_document.uri);
    let uri = params.text_document.uri;

    match params.text {
        Some(text) => state.update_text(&uri, text, None).then_some(uri),
        None => state.is_open(&uri).then_some(uri),
    }
}

/// Handles the `textDocument/didClose` notification.
pub async fn handle_did_close(state: &SharedState, params: DidCloseTextDocumentParams) -> Url {
    debug!("Document closed: {}", params.text_document.uri);
    state.remove_document(&params.text_document.uri);
    params.text_document.uri
}
