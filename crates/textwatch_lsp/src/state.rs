//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;
use tracing::error;

use textwatch_core::{Linter, SettingsStore};
use textwatch_parser::Dialect;

use crate::config::{ParserLoader, load_tree_sitter};

/// Document content, version and pass sequencing.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
    pub dialect: Dialect,
    /// Generation of the newest pass started for this document.
    pub generation: u64,
}

/// Snapshot handed to one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PassTicket {
    pub text: String,
    pub version: i32,
    pub dialect: Dialect,
    pub generation: u64,
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Open JSX/TSX documents.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Linter instance (None until initialized, or if the parser is unavailable).
    pub linter: RwLock<Option<Arc<Linter>>>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
    /// Error that disabled validation, reported once after `initialized`.
    pub startup_error: RwLock<Option<String>>,
    /// Whether the client lets us register file watchers.
    pub can_watch_files: RwLock<bool>,
    /// Serializes publishing so results are never interleaved.
    pub publish_lock: tokio::sync::Mutex<()>,
    /// Loads the parser when the linter is created.
    pub parser_loader: ParserLoader,
    /// Source of pass generations. Monotonic across documents, so a pass
    /// started before a close never matches one started after a reopen.
    generations: AtomicU64,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("linter", &"<Option<Linter>>")
            .field("workspace_root", &self.workspace_root)
            .field("startup_error", &self.startup_error)
            .finish()
    }
}

impl BackendState {
    /// Creates a new empty state backed by the tree-sitter parser.
    pub fn new() -> Self {
        Self::with_parser_loader(load_tree_sitter)
    }

    /// Creates a new empty state whose linter uses `parser_loader`.
    pub fn with_parser_loader(parser_loader: ParserLoader) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            linter: RwLock::new(None),
            workspace_root: RwLock::new(None),
            startup_error: RwLock::new(None),
            can_watch_files: RwLock::new(false),
            publish_lock: tokio::sync::Mutex::new(()),
            parser_loader,
            generations: AtomicU64::new(0),
        }
    }

    /// Creates a new state with a pre-initialized linter.
    #[cfg(test)]
    pub fn with_linter(linter: Option<Linter>) -> Self {
        let state = Self::new();
        if let Ok(mut guard) = state.linter.write() {
            *guard = linter.map(Arc::new);
        }
        state
    }

    /// Stores or replaces a document, keeping its generation.
    pub fn upsert_document(&self, uri: Url, text: String, version: i32, dialect: Dialect) {
        let mut docs = match self.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return;
            }
        };
        match docs.get_mut(&uri) {
            Some(doc) => {
                doc.text = text;
                doc.version = version;
                doc.dialect = dialect;
            }
            None => {
                docs.insert(
                    uri,
                    DocumentData {
                        text,
                        version,
                        dialect,
                        generation: 0,
                    },
                );
            }
        }
    }

    /// Replaces the text of an already open document.
    ///
    /// Returns false if the document is not tracked.
    pub fn update_text(&self, uri: &Url, text: String, version: Option<i32>) -> bool {
        let mut docs = match self.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return false;
            }
        };
        match docs.get_mut(uri) {
            Some(doc) => {
                doc.text = text;
                if let Some(version) = version {
                    doc.version = version;
                }
                true
            }
            None => false,
        }
    }

    /// Forgets a document and its generation.
    pub fn remove_document(&self, uri: &Url) {
        match self.documents.write() {
            Ok(mut docs) => {
                docs.remove(uri);
            }
            Err(e) => error!("Documents lock poisoned: {}", e),
        }
    }

    /// Returns true if the document is tracked.
    pub fn is_open(&self, uri: &Url) -> bool {
        match self.documents.read() {
            Ok(docs) => docs.contains_key(uri),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                false
            }
        }
    }

    /// Returns the URIs of all tracked documents.
    pub fn open_documents(&self) -> Vec<Url> {
        match self.documents.read() {
            Ok(docs) => docs.keys().cloned().collect(),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                Vec::new()
            }
        }
    }

    /// Starts a pass: bumps the document's generation and snapshots its text.
    pub fn begin_pass(&self, uri: &Url) -> Option<PassTicket> {
        let mut docs = match self.documents.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return None;
            }
        };
        let doc = docs.get_mut(uri)?;
        doc.generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        Some(PassTicket {
            text: doc.text.clone(),
            version: doc.version,
            dialect: doc.dialect,
            generation: doc.generation,
        })
    }

    /// Returns true if `generation` is still the newest pass of an open document.
    pub fn is_current(&self, uri: &Url, generation: u64) -> bool {
        match self.documents.read() {
            Ok(docs) => docs.get(uri).is_some_and(|doc| doc.generation == generation),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                false
            }
        }
    }

    /// Returns the linter, if validation is available.
    pub fn linter(&self) -> Option<Arc<Linter>> {
        match self.linter.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                error!("Linter lock poisoned: {}", e);
                None
            }
        }
    }

    /// Returns the settings store of the workspace, if a root is known.
    pub fn settings_store(&self) -> Option<SettingsStore> {
        match self.workspace_root.read() {
            Ok(root) => root.as_ref().map(SettingsStore::for_root),
            Err(e) => {
                error!("Workspace root lock poisoned: {}", e);
                None
            }
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state handle.
pub(crate) type SharedState = Arc<BackendState>;
