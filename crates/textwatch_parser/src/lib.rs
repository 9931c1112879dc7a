//! # textwatch_parser
//!
//! Parser abstraction layer for textwatch.
//!
//! This crate provides:
//! - A `Parser` trait for plugging in any JSX-capable parser
//! - The `Dialect` flag selecting plain JavaScript or TypeScript syntax
//! - Built-in `TreeSitterParser` backed by the tree-sitter grammars
//!
//! ## Architecture
//!
//! Parsers lower source text into [`SyntaxNode`](textwatch_ast::SyntaxNode)
//! trees allocated in a caller-owned arena. The checker only ever talks to the
//! trait, so tests can hand it a fake parser that builds trees by hand.
//!
//! ## Example
//!
//! ```rust
//! use textwatch_ast::{AstArena, NodeKind};
//! use textwatch_parser::{Dialect, Parser, TreeSitterParser};
//!
//! let parser = TreeSitterParser::new().unwrap();
//! let arena = AstArena::new();
//! let source = "const App = () => <View>Hello</View>;";
//!
//! let root = parser.parse(&arena, source, Dialect::Jsx).unwrap();
//! assert_eq!(root.kind, NodeKind::Program);
//! ```

mod dialect;
mod error;
mod traits;
mod tree_sitter_parser;

pub use dialect::Dialect;
pub use error::ParseError;
pub use traits::Parser;
pub use tree_sitter_parser::TreeSitterParser;
