//! Parser trait definition.

use textwatch_ast::{AstArena, SyntaxNode};

use crate::{Dialect, ParseError};

/// Trait for parsing source text into a lowered syntax tree.
///
/// Implementations must be shareable across threads: one parser instance is
/// created per process and handed to every validation pass.
///
/// # Example
///
/// ```rust
/// use textwatch_ast::{AstArena, NodeKind, Span, SyntaxNode};
/// use textwatch_parser::{Dialect, ParseError, Parser};
///
/// /// Produces an empty program for any input.
/// struct EmptyParser;
///
/// impl Parser for EmptyParser {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["jsx"]
///     }
///
///     fn parse<'a>(
///         &self,
///         arena: &'a AstArena,
///         source: &str,
///         _dialect: Dialect,
///     ) -> Result<&'a SyntaxNode<'a>, ParseError> {
///         let span = Span::new(0, source.len() as u32);
///         Ok(arena.alloc(SyntaxNode::new(NodeKind::Program, span, None)))
///     }
/// }
///
/// let arena = AstArena::new();
/// let root = EmptyParser.parse(&arena, "<View/>", Dialect::Jsx).unwrap();
/// assert!(!root.has_children());
/// ```
pub trait Parser: Send + Sync {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["jsx", "tsx"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a syntax tree.
    ///
    /// # Arguments
    ///
    /// * `arena` - The arena allocator for syntax nodes
    /// * `source` - The source text to parse
    /// * `dialect` - Whether the source is JavaScript or TypeScript
    ///
    /// # Returns
    ///
    /// The root node of the parsed tree, or an error if parsing fails.
    fn parse<'a>(
        &self,
        arena: &'a AstArena,
        source: &str,
        dialect: Dialect,
    ) -> Result<&'a SyntaxNode<'a>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
