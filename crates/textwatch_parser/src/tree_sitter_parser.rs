//! JSX/TSX parser using tree-sitter.
//!
//! The tree-sitter grammars produce a concrete syntax tree with far more node
//! kinds than the checker needs. This module lowers it into `SyntaxNode`s:
//! only named nodes are kept, call arguments become direct children of their
//! call, literals are leaves, and adjacent JSX text runs are merged into one
//! `JsxText` node.

use textwatch_ast::{AstArena, NodeKind, Span, SyntaxNode};
use tracing::debug;
use tree_sitter::{Language, Node};

use crate::{Dialect, ParseError, Parser};

/// Parser for JavaScript and TypeScript sources containing JSX.
///
/// Both grammars are loaded when the parser is constructed. A fresh
/// `tree_sitter::Parser` is created for each call to [`Parser::parse`], so a
/// single instance can be shared between threads.
pub struct TreeSitterParser {
    jsx: Language,
    tsx: Language,
}

impl TreeSitterParser {
    /// Loads the JavaScript and TSX grammars.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unavailable`] if either grammar is incompatible
    /// with the linked tree-sitter runtime.
    pub fn new() -> Result<Self, ParseError> {
        let jsx: Language = tree_sitter_javascript::LANGUAGE.into();
        let tsx: Language = tree_sitter_typescript::LANGUAGE_TSX.into();

        for (dialect, language) in [(Dialect::Jsx, &jsx), (Dialect::Tsx, &tsx)] {
            tree_sitter::Parser::new()
                .set_language(language)
                .map_err(|e| ParseError::unavailable(format!("{dialect} grammar: {e}")))?;
        }

        Ok(Self { jsx, tsx })
    }

    fn language(&self, dialect: Dialect) -> &Language {
        match dialect {
            Dialect::Jsx => &self.jsx,
            Dialect::Tsx => &self.tsx,
        }
    }
}

impl Parser for TreeSitterParser {
    fn name(&self) -> &str {
        "tree-sitter"
    }

    fn extensions(&self) -> &[&str] {
        &["jsx", "js", "tsx"]
    }

    fn parse<'a>(
        &self,
        arena: &'a AstArena,
        source: &str,
        dialect: Dialect,
    ) -> Result<&'a SyntaxNode<'a>, ParseError> {
        if u32::try_from(source.len()).is_err() {
            return Err(ParseError::invalid_source("source is larger than 4 GiB"));
        }

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(self.language(dialect))
            .map_err(|e| ParseError::internal(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::internal("tree-sitter returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            debug!(%dialect, "Source has syntax errors, lowering the recovered tree");
        }

        Ok(Lowering { arena, source }.lower(root))
    }
}

/// Converts one tree-sitter tree into arena-allocated `SyntaxNode`s.
struct Lowering<'a, 's> {
    arena: &'a AstArena,
    source: &'s str,
}

/// A child waiting to be lowered.
enum Pending<'t> {
    Node(Node<'t>),
    /// A merged run of JSX text and character references.
    Text(Span),
}

/// A lowered node whose children are still being lowered.
struct Frame<'a, 't> {
    syntax: &'a SyntaxNode<'a>,
    pending: std::vec::IntoIter<Pending<'t>>,
    lowered: Vec<&'a SyntaxNode<'a>>,
}

impl<'a> Lowering<'a, '_> {
    /// Lowers the tree below `root` in pre-order.
    ///
    /// Nesting depth is bounded by heap memory, not by the thread stack: a
    /// long chain like `"a" + "a" + ...` nests one level per operator.
    fn lower(&self, root: Node<'_>) -> &'a SyntaxNode<'a> {
        let top = self.open(root, None);
        let lowered_root = top.syntax;
        let mut stack = vec![top];

        while let Some(frame) = stack.last_mut() {
            match frame.pending.next() {
                Some(Pending::Text(span)) => {
                    let text = self.alloc(NodeKind::JsxText, span, Some(frame.syntax));
                    frame.lowered.push(text);
                }
                Some(Pending::Node(child)) => {
                    let child = self.open(child, Some(frame.syntax));
                    frame.lowered.push(child.syntax);
                    stack.push(child);
                }
                None => {
                    frame
                        .syntax
                        .set_children(self.arena.alloc_slice_copy(&frame.lowered));
                    stack.pop();
                }
            }
        }

        lowered_root
    }

    /// Allocates the lowered node for `node` and lists its children.
    fn open<'t>(&self, node: Node<'t>, parent: Option<&'a SyntaxNode<'a>>) -> Frame<'a, 't> {
        let span = span_of(node);

        let (syntax, children) = match node.kind() {
            "jsx_element" => {
                let name = node
                    .child_by_field_name("open_tag")
                    .and_then(|open| open.child_by_field_name("name"));
                let element = match name {
                    Some(name) => self.alloc_element(NodeKind::JsxElement, span, parent, name),
                    // `<>...</>`
                    None => self.alloc(NodeKind::JsxFragment, span, parent),
                };
                (element, jsx_children(node))
            }

            "jsx_self_closing_element" => {
                let element = match node.child_by_field_name("name") {
                    Some(name) => {
                        self.alloc_element(NodeKind::JsxSelfClosingElement, span, parent, name)
                    }
                    None => self.alloc(NodeKind::JsxSelfClosingElement, span, parent),
                };
                (element, pending(named_children(node)))
            }

            "jsx_text" | "html_character_reference" => {
                (self.alloc(NodeKind::JsxText, span, parent), Vec::new())
            }

            "string" => (self.alloc(NodeKind::StringLiteral, span, parent), Vec::new()),

            "template_string" => {
                let substitutions: Vec<Node<'t>> = named_children(node)
                    .into_iter()
                    .filter(|child| child.kind() == "template_substitution")
                    .collect();

                if substitutions.is_empty() {
                    (
                        self.alloc(NodeKind::NoSubstitutionTemplate, span, parent),
                        Vec::new(),
                    )
                } else {
                    (self.alloc(NodeKind::Other, span, parent), pending(substitutions))
                }
            }

            "call_expression" => {
                let tagged = node
                    .child_by_field_name("arguments")
                    .is_some_and(|args| args.kind() == "template_string");
                let kind = if tagged {
                    NodeKind::TaggedTemplate
                } else {
                    NodeKind::CallExpression
                };

                let mut children = Vec::new();
                for child in named_children(node) {
                    if child.kind() == "arguments" {
                        children.extend(named_children(child));
                    } else {
                        children.push(child);
                    }
                }
                (self.alloc(kind, span, parent), pending(children))
            }

            kind => (
                self.alloc(map_kind(kind), span, parent),
                pending(named_children(node)),
            ),
        };

        Frame {
            syntax,
            pending: children.into_iter(),
            lowered: Vec::new(),
        }
    }

    fn alloc(
        &self,
        kind: NodeKind,
        span: Span,
        parent: Option<&'a SyntaxNode<'a>>,
    ) -> &'a SyntaxNode<'a> {
        self.arena.alloc(SyntaxNode::new(kind, span, parent))
    }

    fn alloc_element(
        &self,
        kind: NodeKind,
        span: Span,
        parent: Option<&'a SyntaxNode<'a>>,
        name: Node<'_>,
    ) -> &'a SyntaxNode<'a> {
        let tag = self
            .source
            .get(name.start_byte()..name.end_byte())
            .unwrap_or_default();
        let tag = self.arena.alloc_str(tag);
        self.arena
            .alloc(SyntaxNode::new(kind, span, parent).with_tag_name(tag))
    }
}

fn map_kind(kind: &str) -> NodeKind {
    match kind {
        "program" => NodeKind::Program,
        "jsx_opening_element" => NodeKind::JsxOpeningElement,
        "jsx_closing_element" => NodeKind::JsxClosingElement,
        "jsx_attribute" => NodeKind::JsxAttribute,
        "jsx_expression" => NodeKind::JsxExpression,
        _ => NodeKind::Other,
    }
}

/// Children of a `jsx_element`, with consecutive text runs and character
/// references merged into one span.
fn jsx_children(node: Node<'_>) -> Vec<Pending<'_>> {
    let mut children = Vec::new();
    let mut run: Option<Span> = None;

    for child in named_children(node) {
        if matches!(child.kind(), "jsx_text" | "html_character_reference") {
            let span = span_of(child);
            run = Some(match run {
                Some(open) => Span::new(open.start, span.end),
                None => span,
            });
            continue;
        }

        if let Some(text) = run.take() {
            children.push(Pending::Text(text));
        }
        children.push(Pending::Node(child));
    }

    if let Some(text) = run {
        children.push(Pending::Text(text));
    }
    children
}

fn pending(nodes: Vec<Node<'_>>) -> Vec<Pending<'_>> {
    nodes.into_iter().map(Pending::Node).collect()
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Source length is checked against `u32::MAX` before lowering starts.
fn span_of(node: Node<'_>) -> Span {
    Span::new(node.start_byte() as u32, node.end_byte() as u32)
}
