//! Line scanner with SIMD-accelerated newline search.
//!
//! The export format is line oriented: headers, metadata and delimiters
//! each occupy one line. The lexer hands out borrowed lines with their
//! byte spans and accepts both `\n` and `\r\n` endings.

use crate::span::Span;
use memchr::memchr;

/// Byte-order mark some exporters write before a header line.
pub const BOM: char = '\u{feff}';

/// A single line from the input with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline).
    pub text: &'a str,
    /// Byte span in the original input.
    pub span: Span,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace (a stray BOM counts).
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(|c| c.is_whitespace() || c == BOM)
    }

    /// Line text with the BOM and surrounding whitespace removed.
    #[inline]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim_start_matches(BOM).trim()
    }
}

/// Line-based lexer over the export text.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
        }
    }

    /// Check if all input has been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Consume and return the next line, or `None` at end of input.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.is_eof() {
            return None;
        }

        let start = self.offset;

        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        // CRLF: drop the CR before the newline
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };

        Some(Line {
            // SAFETY: `start` is 0 or one past a `\n`, and `text_end` sits on a
            // `\r`, a `\n` or the end of input. Both are ASCII or the end, so
            // both offsets are char boundaries of the `&str` we borrowed.
            text: unsafe { self.input.get_unchecked(start..text_end) },
            span: Span::new(start, text_end),
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
