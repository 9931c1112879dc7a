//! SyntaxNode definition.
//!
//! The node type every parser lowers into and the checker walks.

use std::cell::Cell;
use std::fmt;

use crate::{NodeKind, Span};

/// A node in the lowered syntax tree.
///
/// Nodes are allocated in an [`AstArena`](crate::AstArena) and linked both
/// ways: children are a slice of references, and each node points back to
/// its parent. Links live in `Cell`s so a parser can allocate a node first
/// and attach its children afterwards without any mutable aliasing.
///
/// # Lifetime
///
/// The `'a` lifetime ties the node to its arena, so every parent and child
/// reference stays valid for as long as the arena does.
///
/// # Example
///
/// ```rust
/// use textwatch_ast::{AstArena, NodeKind, Span, SyntaxNode};
///
/// let arena = AstArena::new();
/// let source = "<Text>Hi</Text>";
///
/// let element = arena.alloc(
///     SyntaxNode::new(NodeKind::JsxElement, Span::new(0, 15), None).with_tag_name("Text"),
/// );
/// let text = arena.alloc(SyntaxNode::new(NodeKind::JsxText, Span::new(6, 8), Some(element)));
/// element.set_children(arena.alloc_slice_copy(&[text]));
///
/// assert_eq!(text.text(source), Some("Hi"));
/// assert_eq!(text.ancestors().count(), 2);
/// ```
pub struct SyntaxNode<'a> {
    /// The kind of this node.
    pub kind: NodeKind,

    /// Byte span in the source text.
    pub span: Span,

    /// Opening tag name, for JSX elements.
    tag_name: Option<&'a str>,

    parent: Cell<Option<&'a SyntaxNode<'a>>>,

    children: Cell<&'a [&'a SyntaxNode<'a>]>,
}

impl<'a> SyntaxNode<'a> {
    /// Creates a node with no children yet.
    #[inline]
    pub fn new(kind: NodeKind, span: Span, parent: Option<&'a SyntaxNode<'a>>) -> Self {
        Self {
            kind,
            span,
            tag_name: None,
            parent: Cell::new(parent),
            children: Cell::new(&[]),
        }
    }

    /// Sets the opening tag name (`View`, `Animated.Text`, ...).
    #[inline]
    pub fn with_tag_name(mut self, tag_name: &'a str) -> Self {
        self.tag_name = Some(tag_name);
        self
    }

    /// Returns the opening tag name, if this is a named JSX element.
    #[inline]
    pub fn tag_name(&self) -> Option<&'a str> {
        self.tag_name
    }

    /// Returns the parent node, or `None` for a root or detached node.
    #[inline]
    pub fn parent(&self) -> Option<&'a SyntaxNode<'a>> {
        self.parent.get()
    }

    /// Returns the child nodes in source order.
    #[inline]
    pub fn children(&self) -> &'a [&'a SyntaxNode<'a>] {
        self.children.get()
    }

    /// Attaches the child nodes.
    #[inline]
    pub fn set_children(&self, children: &'a [&'a SyntaxNode<'a>]) {
        self.children.set(children);
    }

    /// Returns true if this node has children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.get().is_empty()
    }

    /// Iterates over this node followed by each of its ancestors up to the
    /// root.
    #[inline]
    pub fn ancestors(&'a self) -> Ancestors<'a> {
        Ancestors { next: Some(self) }
    }

    /// Returns the source text this node spans.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.span.slice(source)
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Parent links would make a derived impl recurse forever.
        f.debug_struct("SyntaxNode")
            .field("kind", &self.kind)
            .field("span", &self.span)
            .field("tag_name", &self.tag_name)
            .field("children", &self.children.get().len())
            .finish()
    }
}

/// Iterator over a node and its ancestors, innermost first.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a SyntaxNode<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstArena;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_node_has_no_children() {
        let node = SyntaxNode::new(NodeKind::JsxText, Span::new(0, 5), None);
        assert!(!node.has_children());
        assert!(node.parent().is_none());
        assert!(node.tag_name().is_none());
    }

    #[test]
    fn test_ancestors_walk_to_root() {
        let arena = AstArena::new();
        let program = arena.alloc(SyntaxNode::new(NodeKind::Program, Span::new(0, 30), None));
        let view = arena.alloc(
            SyntaxNode::new(NodeKind::JsxElement, Span::new(0, 30), Some(program))
                .with_tag_name("View"),
        );
        let text = arena.alloc(SyntaxNode::new(
            NodeKind::JsxText,
            Span::new(6, 11),
            Some(view),
        ));
        program.set_children(arena.alloc_slice_copy(&[view]));
        view.set_children(arena.alloc_slice_copy(&[text]));

        let kinds: Vec<NodeKind> = text.ancestors().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::JsxText, NodeKind::JsxElement, NodeKind::Program]
        );
        assert_eq!(view.children().len(), 1);
        assert_eq!(text.parent().and_then(|p| p.tag_name()), Some("View"));
    }

    #[test]
    fn test_detached_node_ancestors_is_self_only() {
        let arena = AstArena::new();
        let node = arena.alloc(SyntaxNode::new(
            NodeKind::StringLiteral,
            Span::new(0, 4),
            None,
        ));
        assert_eq!(node.ancestors().count(), 1);
    }

    #[test]
    fn test_text() {
        let source = "<View>Hello</View>";
        let node = SyntaxNode::new(NodeKind::JsxText, Span::new(6, 11), None);
        assert_eq!(node.text(source), Some("Hello"));
    }

    #[test]
    fn test_debug_does_not_follow_parent() {
        let arena = AstArena::new();
        let parent = arena.alloc(SyntaxNode::new(NodeKind::Program, Span::new(0, 1), None));
        let child = arena.alloc(SyntaxNode::new(
            NodeKind::Other,
            Span::new(0, 1),
            Some(parent),
        ));
        parent.set_children(arena.alloc_slice_copy(&[child]));

        let debug = format!("{:?}", parent);
        assert!(debug.contains("Program"));
        assert!(debug.contains("children: 1"));
    }
}
