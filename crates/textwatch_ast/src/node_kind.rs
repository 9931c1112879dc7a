//! Node kinds for the lowered syntax tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of syntax nodes the naked-text checker distinguishes.
///
/// Parsers map every grammar node they keep onto one of these. Anything the
/// checker does not care about becomes [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NodeKind {
    /// Root of a parsed file.
    Program,

    // JSX
    /// `<Tag ...>children</Tag>`.
    JsxElement,
    /// `<Tag ... />`.
    JsxSelfClosingElement,
    /// `<>children</>`.
    JsxFragment,
    /// `<Tag ...>` of an element.
    JsxOpeningElement,
    /// `</Tag>` of an element.
    JsxClosingElement,
    /// `name="value"` or `name={value}` on an opening element.
    JsxAttribute,
    /// `{expression}` inside JSX.
    JsxExpression,
    /// Raw text run between JSX tags.
    JsxText,

    // Literals
    /// `"..."` or `'...'`.
    StringLiteral,
    /// `` `...` `` without `${}` substitutions.
    NoSubstitutionTemplate,

    // Expressions
    /// `callee(args)`; arguments are direct children.
    CallExpression,
    /// `` tag`...` ``.
    TaggedTemplate,

    /// Any other node.
    Other,
}

impl NodeKind {
    /// Returns true for the two element kinds that carry an opening tag name.
    #[inline]
    pub const fn is_jsx_element(&self) -> bool {
        matches!(self, Self::JsxElement | Self::JsxSelfClosingElement)
    }

    /// Returns true for raw JSX text and string-literal-like nodes.
    #[inline]
    pub const fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::JsxText | Self::StringLiteral | Self::NoSubstitutionTemplate
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NodeKind::JsxElement, true)]
    #[case(NodeKind::JsxSelfClosingElement, true)]
    #[case(NodeKind::JsxFragment, false)]
    #[case(NodeKind::JsxOpeningElement, false)]
    #[case(NodeKind::Program, false)]
    fn test_is_jsx_element(#[case] kind: NodeKind, #[case] expected: bool) {
        assert_eq!(kind.is_jsx_element(), expected);
    }

    #[rstest]
    #[case(NodeKind::JsxText, true)]
    #[case(NodeKind::StringLiteral, true)]
    #[case(NodeKind::NoSubstitutionTemplate, true)]
    #[case(NodeKind::TaggedTemplate, false)]
    #[case(NodeKind::JsxExpression, false)]
    fn test_is_text_like(#[case] kind: NodeKind, #[case] expected: bool) {
        assert_eq!(kind.is_text_like(), expected);
    }

    #[test]
    fn test_serialize_pascal_case() {
        let json = serde_json::to_string(&NodeKind::JsxSelfClosingElement).unwrap();
        assert_eq!(json, "\"JsxSelfClosingElement\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeKind::JsxText.to_string(), "JsxText");
    }
}
