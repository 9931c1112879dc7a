//! Naked text extraction.

use std::ops::ControlFlow;

use serde::Serialize;
use textwatch_ast::visitor::{VisitResult, Visitor, walk_node};
use textwatch_ast::{AstArena, Range, Span, SyntaxNode};
use textwatch_parser::{Dialect, ParseError, Parser};

use crate::allowlist::ComponentAllowlist;
use crate::classifier::{Enclosing, is_bare_text_in};
use crate::locate::{LineIndex, trim_and_locate};

/// A text literal rendered outside any text component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NakedTextMatch {
    /// The trimmed text.
    pub text: String,
    /// Range of the trimmed text.
    pub range: Range,
    /// Byte span of the trimmed text.
    pub span: Span,
}

/// Parses `source` and returns every naked text literal in document order.
pub fn extract_naked_texts(
    parser: &dyn Parser,
    source: &str,
    dialect: Dialect,
    allowlist: &ComponentAllowlist,
) -> Result<Vec<NakedTextMatch>, ParseError> {
    let arena = AstArena::for_source(source.len());
    let root = parser.parse(&arena, source, dialect)?;
    Ok(collect_naked_texts(root, source, allowlist))
}

/// Walks an already parsed tree and returns every naked text literal.
///
/// Nodes are visited in pre-order, so the result is ordered by position
/// of the enclosing literal. Subtrees of a match are still visited.
pub fn collect_naked_texts<'a>(
    root: &'a SyntaxNode<'a>,
    source: &str,
    allowlist: &ComponentAllowlist,
) -> Vec<NakedTextMatch> {
    let mut collector = NakedTextCollector {
        source,
        allowlist,
        index: LineIndex::new(source),
        enclosing: Vec::new(),
        matches: Vec::new(),
    };
    let _ = walk_node(&mut collector, root);
    collector.matches
}

struct NakedTextCollector<'s> {
    source: &'s str,
    allowlist: &'s ComponentAllowlist,
    index: LineIndex,
    /// Context of every node on the current path, innermost last.
    enclosing: Vec<Enclosing>,
    matches: Vec<NakedTextMatch>,
}

impl<'a> Visitor<'a> for NakedTextCollector<'_> {
    fn enter_node(&mut self, node: &'a SyntaxNode<'a>) -> VisitResult {
        let outer = self.enclosing.last().copied().unwrap_or_default();
        let enclosing = outer.enter(node, self.allowlist);
        self.enclosing.push(enclosing);

        if is_bare_text_in(node, self.source, enclosing)
            && let Some(found) = trim_and_locate(node.span, self.source, &self.index)
        {
            self.matches.push(found);
        }
        ControlFlow::Continue(())
    }

    fn exit_node(&mut self, _node: &'a SyntaxNode<'a>) -> VisitResult {
        self.enclosing.pop();
        ControlFlow::Continue(())
    }
}
