//! # textwatch_ast
//!
//! Syntax tree definitions for textwatch.
//!
//! Parsers lower their native trees (tree-sitter, or a hand-built tree in
//! tests) into [`SyntaxNode`]s so the naked-text checker works against one
//! typed shape regardless of the grammar that produced it.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for arena allocation
//! - All nodes of one parsed file live in the same arena
//! - Nodes carry parent links, so ancestor lookups are a pointer walk
//! - Memory is freed all at once when the validation pass ends
//!
//! ## Example
//!
//! ```rust
//! use textwatch_ast::{AstArena, NodeKind, Span, SyntaxNode};
//!
//! let arena = AstArena::new();
//!
//! let root = arena.alloc(SyntaxNode::new(NodeKind::Program, Span::new(0, 5), None));
//! let text = arena.alloc(SyntaxNode::new(NodeKind::JsxText, Span::new(0, 5), Some(root)));
//! root.set_children(arena.alloc_slice_copy(&[&*text]));
//!
//! assert_eq!(text.parent().map(|p| p.kind), Some(NodeKind::Program));
//! ```

mod arena;
mod node;
mod node_kind;
mod span;
pub mod visitor;

pub use arena::AstArena;
pub use node::{Ancestors, SyntaxNode};
pub use node_kind::NodeKind;
pub use span::{Position, Range, Span};

pub use visitor::{VisitResult, Visitor};
