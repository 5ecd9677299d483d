//! Entry splitter.
//!
//! Cuts the export into raw entry blocks at delimiter lines. A delimiter is
//! a line made only of `=` characters, at least [`DELIMITER_MIN_LEN`] long,
//! with any surrounding whitespace. Blocks that contain nothing but blank
//! lines (leading or trailing delimiters, trailing newlines) are dropped.

use crate::lexer::{Lexer, Line};
use crate::span::Span;

/// Minimum number of `=` characters that make a delimiter line.
pub const DELIMITER_MIN_LEN: usize = 10;

/// The delimiter written by [`crate::render`].
pub const DELIMITER: &str = "==========";

/// The unparsed text of one clipping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry<'a> {
    /// Zero-based ordinal among the non-blank blocks.
    pub index: usize,
    /// Lines of the block, without the delimiter.
    pub lines: Vec<Line<'a>>,
    /// Byte span from the first to the last non-blank line.
    pub span: Span,
}

impl<'a> RawEntry<'a> {
    /// Source text of the block.
    pub fn text(&self, input: &'a str) -> &'a str {
        self.span.source(input)
    }

    /// Lines with leading blank lines skipped.
    pub fn content_lines(&self) -> &[Line<'a>] {
        let start = self
            .lines
            .iter()
            .position(|line| !line.is_blank())
            .unwrap_or(self.lines.len());
        &self.lines[start..]
    }
}

/// Check whether a line separates two entries.
#[inline]
pub fn is_delimiter(line: &Line<'_>) -> bool {
    let trimmed = line.trimmed();
    trimmed.len() >= DELIMITER_MIN_LEN && trimmed.bytes().all(|b| b == b'=')
}

/// Split the export text into entry blocks in a single pass.
///
/// Never fails. Zero delimiters produce at most one block; an empty or
/// blank input produces none.
pub fn split_entries(input: &str) -> Vec<RawEntry<'_>> {
    let mut entries = Vec::new();
    let mut current: Vec<Line<'_>> = Vec::new();

    for line in Lexer::new(input) {
        if is_delimiter(&line) {
            flush(&mut current, &mut entries);
        } else {
            current.push(line);
        }
    }
    flush(&mut current, &mut entries);

    entries
}

fn flush<'a>(current: &mut Vec<Line<'a>>, entries: &mut Vec<RawEntry<'a>>) {
    let lines = std::mem::take(current);

    let first = lines.iter().find(|line| !line.is_blank());
    let last = lines.iter().rev().find(|line| !line.is_blank());

    if let (Some(first), Some(last)) = (first, last) {
        let span = first.span.merge(last.span);
        entries.push(RawEntry {
            index: entries.len(),
            lines,
            span,
        });
    }
}
