//! Visitor pattern for syntax tree traversal.
//!
//! [`walk_node`] performs a pre-order depth-first walk: a node is entered
//! before any of its children, children are visited left to right, and every
//! node is visited exactly once.
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use textwatch_ast::{AstArena, NodeKind, Span, SyntaxNode};
//! use textwatch_ast::visitor::{VisitResult, Visitor, walk_node};
//!
//! struct KindCollector(Vec<NodeKind>);
//!
//! impl<'a> Visitor<'a> for KindCollector {
//!     fn enter_node(&mut self, node: &'a SyntaxNode<'a>) -> VisitResult {
//!         self.0.push(node.kind);
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let root = arena.alloc(SyntaxNode::new(NodeKind::Program, Span::new(0, 2), None));
//! let text = arena.alloc(SyntaxNode::new(NodeKind::JsxText, Span::new(0, 2), Some(root)));
//! root.set_children(arena.alloc_slice_copy(&[text]));
//!
//! let mut collector = KindCollector(Vec::new());
//! let _ = walk_node(&mut collector, root);
//! assert_eq!(collector.0, vec![NodeKind::Program, NodeKind::JsxText]);
//! ```

use std::ops::ControlFlow;

use crate::SyntaxNode;

/// Result type for visitor methods. `Break` stops the whole traversal.
pub type VisitResult = ControlFlow<()>;

/// Read-only syntax tree visitor.
pub trait Visitor<'a> {
    /// Called before a node's children are walked.
    fn enter_node(&mut self, _node: &'a SyntaxNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after all of a node's children were walked.
    fn exit_node(&mut self, _node: &'a SyntaxNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }
}

/// Walks `node` and its whole subtree in pre-order.
pub fn walk_node<'a, V>(visitor: &mut V, node: &'a SyntaxNode<'a>) -> VisitResult
where
    V: Visitor<'a> + ?Sized,
{
    visitor.enter_node(node)?;
    walk_children(visitor, node)?;
    visitor.exit_node(node)
}

/// Walks the children of `node` without entering `node` itself.
///
/// The walk keeps its own stack, so arbitrarily deep trees are walked
/// without growing the thread stack.
pub fn walk_children<'a, V>(visitor: &mut V, node: &'a SyntaxNode<'a>) -> VisitResult
where
    V: Visitor<'a> + ?Sized,
{
    // (node, index of the next child to enter)
    let mut stack: Vec<(&'a SyntaxNode<'a>, usize)> = vec![(node, 0)];

    while let Some(frame) = stack.last_mut() {
        let (parent, index) = *frame;
        match parent.children().get(index) {
            Some(&child) => {
                frame.1 += 1;
                visitor.enter_node(child)?;
                stack.push((child, 0));
            }
            None => {
                stack.pop();
                if !stack.is_empty() {
                    visitor.exit_node(parent)?;
                }
            }
        }
    }

    ControlFlow::Continue(())
}
