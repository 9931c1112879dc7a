//! Linter setup for the workspace.

use std::sync::Arc;

use tracing::{error, info};

use textwatch_core::Linter;
use textwatch_parser::{ParseError, Parser, TreeSitterParser};

use crate::state::BackendState;

/// Loads the parser backing the linter. Called once per `initialize`.
pub type ParserLoader = fn() -> Result<Arc<dyn Parser>, ParseError>;

/// Loads the built-in tree-sitter parser.
pub fn load_tree_sitter() -> Result<Arc<dyn Parser>, ParseError> {
    Ok(Arc::new(TreeSitterParser::new()?))
}

/// Creates the linter for the current workspace root.
///
/// A parser that cannot be loaded disables validation for the session; the
/// error is kept so it can be shown to the user once.
pub fn init_linter(state: &BackendState) {
    let root = match state.workspace_root.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let linter = match (state.parser_loader)() {
        Ok(parser) => {
            match &root {
                Some(path) => info!("Linter initialized for {}", path.display()),
                None => info!("Linter initialized without a workspace root"),
            }
            Some(Arc::new(Linter::with_parser(parser, root.as_deref())))
        }
        Err(e) => {
            error!("Failed to initialize linter: {}. LSP will run without validation.", e);
            match state.startup_error.write() {
                Ok(mut slot) => *slot = Some(format!("textwatch is disabled: {e}")),
                Err(poisoned) => error!("Startup error lock poisoned: {}", poisoned),
            }
            None
        }
    };

    match state.linter.write() {
        Ok(mut guard) => *guard = linter,
        Err(e) => error!("Linter lock poisoned: {}", e),
    }
}
