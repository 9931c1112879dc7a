//! Naked text classification.

use std::sync::OnceLock;

use regex::Regex;
use textwatch_ast::{NodeKind, SyntaxNode};

use crate::allowlist::ComponentAllowlist;

/// `{'...'}`, `{"..."}` or `` {`...`} `` written as plain text.
const QUOTED_EXPRESSION_PATTERN: &str = r#"\{['"`](.*?)['"`]\}"#;

static QUOTED_EXPRESSION: OnceLock<Regex> = OnceLock::new();

fn quoted_expression() -> &'static Regex {
    QUOTED_EXPRESSION.get_or_init(|| {
        Regex::new(QUOTED_EXPRESSION_PATTERN).expect("Invalid embedded quoted expression pattern")
    })
}

/// What a node sits in, the node itself included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enclosing {
    /// An element whose tag is in the allowlist.
    pub allowed_component: bool,
    /// A `JsxElement` or `JsxSelfClosingElement`. Fragments do not count.
    pub jsx_element: bool,
    /// A JSX attribute.
    pub jsx_attribute: bool,
}

impl Enclosing {
    /// Computes the context of `node` by walking up to the root.
    pub fn of<'a>(node: &'a SyntaxNode<'a>, allowlist: &ComponentAllowlist) -> Self {
        node.ancestors()
            .fold(Self::default(), |outer, n| outer.enter(n, allowlist))
    }

    /// Returns the context of `node`, given the context of its parent.
    pub fn enter(self, node: &SyntaxNode<'_>, allowlist: &ComponentAllowlist) -> Self {
        let element = node.kind.is_jsx_element();
        Self {
            allowed_component: self.allowed_component
                || (element && node.tag_name().is_some_and(|tag| allowlist.contains(tag))),
            jsx_element: self.jsx_element || element,
            jsx_attribute: self.jsx_attribute || node.kind == NodeKind::JsxAttribute,
        }
    }
}

/// Returns true if `node` is raw text that must be wrapped in a text
/// component.
///
/// The checks run in order and the first failing one decides:
///
/// 1. no enclosing element (the node itself included) is in `allowlist`
/// 2. at least one enclosing `JsxElement` or `JsxSelfClosingElement`
///    exists; fragments do not count
/// 3. the parent is not a call expression
/// 4. the node is `JsxText`, a string literal or a template without
///    substitutions
/// 5. the node is not inside a JSX attribute
/// 6. the text is not blank
/// 7. the trimmed text is not a quoted string wrapped in braces
pub fn is_bare_text<'a>(
    node: &'a SyntaxNode<'a>,
    source: &str,
    allowlist: &ComponentAllowlist,
) -> bool {
    is_bare_text_in(node, source, Enclosing::of(node, allowlist))
}

/// Same as [`is_bare_text`], with the enclosing context already known.
///
/// Tree walks track `Enclosing` as they descend, which keeps each check
/// constant-time however deep the node is.
pub fn is_bare_text_in(node: &SyntaxNode<'_>, source: &str, enclosing: Enclosing) -> bool {
    if enclosing.allowed_component {
        return false;
    }

    if !enclosing.jsx_element {
        return false;
    }

    if node
        .parent()
        .is_some_and(|parent| parent.kind == NodeKind::CallExpression)
    {
        return false;
    }

    if !node.kind.is_text_like() {
        return false;
    }

    if enclosing.jsx_attribute {
        return false;
    }

    let Some(text) = node.text(source).map(str::trim) else {
        return false;
    };
    if text.is_empty() {
        return false;
    }

    !is_quoted_expression(text)
}

fn is_quoted_expression(text: &str) -> bool {
    text.starts_with('{') && text.ends_with('}') && quoted_expression().is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use textwatch_ast::{AstArena, Span};

    /// Builds `Program > <tag> > ... > leaf` from `path` (outermost first)
    /// and returns the leaf. Each entry is a kind and an optional tag.
    fn chain<'a>(
        arena: &'a AstArena,
        path: &[(NodeKind, Option<&'static str>)],
        leaf: NodeKind,
        leaf_span: Span,
    ) -> &'a SyntaxNode<'a> {
        let mut parent: &'a SyntaxNode<'a> =
            arena.alloc(SyntaxNode::new(NodeKind::Program, Span::new(0, 0), None));
        for &(kind, tag) in path {
            let mut node = SyntaxNode::new(kind, Span::new(0, 0), Some(parent));
            if let Some(tag) = tag {
                node = node.with_tag_name(tag);
            }
            let node = arena.alloc(node);
            parent.set_children(arena.alloc_slice_copy(&[node]));
            parent = node;
        }
        let leaf = arena.alloc(SyntaxNode::new(leaf, leaf_span, Some(parent)));
        parent.set_children(arena.alloc_slice_copy(&[leaf]));
        leaf
    }

    const SOURCE: &str = "hello   {'quoted'}  \"str\"";
    const HELLO: Span = Span::new(0, 5);
    const BLANK: Span = Span::new(5, 8);
    const QUOTED: Span = Span::new(8, 18);
    const STRING: Span = Span::new(20, 25);

    fn view() -> (NodeKind, Option<&'static str>) {
        (NodeKind::JsxElement, Some("View"))
    }

    #[test]
    fn test_text_in_element_is_bare() {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[view()], NodeKind::JsxText, HELLO);
        assert!(is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[rstest]
    #[case("Text", ComponentAllowlist::default())]
    #[case("MyText", ComponentAllowlist::new(["MyText"]))]
    fn test_allowed_component(#[case] tag: &'static str, #[case] allowlist: ComponentAllowlist) {
        let arena = AstArena::new();
        let leaf = chain(
            &arena,
            &[(NodeKind::JsxElement, Some(tag))],
            NodeKind::JsxText,
            HELLO,
        );
        assert!(!is_bare_text(leaf, SOURCE, &allowlist));
    }

    #[test]
    fn test_allowed_component_deep_ancestor() {
        let arena = AstArena::new();
        let leaf = chain(
            &arena,
            &[
                (NodeKind::JsxElement, Some("MyText")),
                (NodeKind::JsxElement, Some("View")),
                (NodeKind::JsxExpression, None),
                (NodeKind::JsxElement, Some("View")),
            ],
            NodeKind::JsxText,
            HELLO,
        );
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::new(["MyText"])));
    }

    #[test]
    fn test_no_jsx_ancestor() {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[(NodeKind::Other, None)], NodeKind::StringLiteral, STRING);
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_fragment_is_not_a_jsx_ancestor() {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[(NodeKind::JsxFragment, None)], NodeKind::JsxText, HELLO);
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_self_closing_element_counts_as_jsx_ancestor() {
        let arena = AstArena::new();
        let leaf = chain(
            &arena,
            &[
                (NodeKind::JsxSelfClosingElement, Some("Icon")),
                (NodeKind::Other, None),
            ],
            NodeKind::StringLiteral,
            STRING,
        );
        assert!(is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_call_argument() {
        let arena = AstArena::new();
        let leaf = chain(
            &arena,
            &[view(), (NodeKind::JsxExpression, None), (NodeKind::CallExpression, None)],
            NodeKind::StringLiteral,
            STRING,
        );
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_only_immediate_call_parent_excludes() {
        let arena = AstArena::new();
        let leaf = chain(
            &arena,
            &[
                view(),
                (NodeKind::CallExpression, None),
                (NodeKind::Other, None),
            ],
            NodeKind::StringLiteral,
            STRING,
        );
        assert!(is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[rstest]
    #[case(NodeKind::JsxText)]
    #[case(NodeKind::StringLiteral)]
    #[case(NodeKind::NoSubstitutionTemplate)]
    fn test_text_like_kinds(#[case] kind: NodeKind) {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[view()], kind, HELLO);
        assert!(is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[rstest]
    #[case(NodeKind::Other)]
    #[case(NodeKind::TaggedTemplate)]
    #[case(NodeKind::JsxExpression)]
    fn test_other_kinds(#[case] kind: NodeKind) {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[view()], kind, HELLO);
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_element_itself_is_not_text() {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[], NodeKind::JsxElement, HELLO);
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_attribute_value() {
        let arena = AstArena::new();
        let leaf = chain(
            &arena,
            &[
                (NodeKind::JsxSelfClosingElement, Some("View")),
                (NodeKind::JsxAttribute, None),
                (NodeKind::JsxExpression, None),
            ],
            NodeKind::StringLiteral,
            STRING,
        );
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_blank_text() {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[view()], NodeKind::JsxText, BLANK);
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_quoted_expression_text() {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[view()], NodeKind::JsxText, QUOTED);
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_out_of_bounds_span() {
        let arena = AstArena::new();
        let leaf = chain(&arena, &[view()], NodeKind::JsxText, Span::new(0, 500));
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[test]
    fn test_detached_node() {
        let arena = AstArena::new();
        let leaf = arena.alloc(SyntaxNode::new(NodeKind::JsxText, HELLO, None));
        assert!(!is_bare_text(leaf, SOURCE, &ComponentAllowlist::default()));
    }

    #[rstest]
    #[case("{'hello'}", true)]
    #[case("{\"hello\"}", true)]
    #[case("{`hello`}", true)]
    #[case("{ hello }", false)]
    #[case("{'a'} and {'b'}", true)]
    #[case("'hello'", false)]
    #[case("{'hello'", false)]
    fn test_is_quoted_expression(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_quoted_expression(text), expected);
    }

    #[test]
    fn test_enclosing_of_leaf() {
        let arena = AstArena::new();
        let leaf = chain(
            &arena,
            &[
                (NodeKind::JsxSelfClosingElement, Some("Image")),
                (NodeKind::JsxAttribute, None),
            ],
            NodeKind::StringLiteral,
            STRING,
        );

        assert_eq!(
            Enclosing::of(leaf, &ComponentAllowlist::default()),
            Enclosing {
                allowed_component: false,
                jsx_element: true,
                jsx_attribute: true,
            }
        );
        assert!(Enclosing::of(leaf, &ComponentAllowlist::new(["Image"])).allowed_component);
    }
}
