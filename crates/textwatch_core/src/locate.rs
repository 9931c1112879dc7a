//! Byte offset to line/character conversion, and whitespace trimming of
//! matched spans.

use textwatch_ast::{Position, Range, Span};

use crate::extractor::NakedTextMatch;

/// Line start offsets of one source text.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Characters are counted in
/// UTF-16 code units.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Builds the index for `source`.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let bytes = source.as_bytes();

        for (i, &b) in bytes.iter().enumerate() {
            let is_break = match b {
                b'\n' => true,
                b'\r' => bytes.get(i + 1) != Some(&b'\n'),
                _ => false,
            };
            if is_break {
                line_starts.push(i as u32 + 1);
            }
        }

        Self { line_starts }
    }

    /// Number of lines, counting a trailing empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into a zero-based position.
    ///
    /// `offset` must lie on a character boundary of `source`; offsets past the
    /// end are clamped.
    pub fn position(&self, source: &str, offset: u32) -> Position {
        let offset = offset.min(source.len() as u32);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];

        let character = source
            .get(line_start as usize..offset as usize)
            .map_or(0, |prefix| prefix.encode_utf16().count());

        Position::new(line as u32, character as u32)
    }
}

/// Trims `span` and resolves the trimmed text to a range.
///
/// Returns `None` for an all-whitespace or out-of-bounds span.
pub fn trim_and_locate(span: Span, source: &str, index: &LineIndex) -> Option<NakedTextMatch> {
    let raw = span.slice(source)?;
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let leading = raw.len() - raw.trim_start().len();
    let start = span.start + leading as u32;
    let end = start + text.len() as u32;

    Some(NakedTextMatch {
        text: text.to_string(),
        range: Range::new(index.position(source, start), index.position(source, end)),
        span: Span::new(start, end),
    })
}
