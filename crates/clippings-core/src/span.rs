//! Byte ranges into the raw export text.
//!
//! Entry blocks and diagnostics carry a `Span` so that a caller can point
//! back at the exact bytes that produced a clipping or a parse failure.

/// A byte range `[start, end)` in the export text.
///
/// ```rust
/// use clippings_core::span::Span;
///
/// let export = "Flow (Mihaly Csikszentmihalyi)\n- Your Note at location 5\n";
/// let metadata = Span::new(31, 56);
///
/// assert_eq!(metadata.source(export), "- Your Note at location 5");
/// assert_eq!(metadata.line_number(export), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering the first line of a block through its last.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The exported text this span covers. Empty when the span does not
    /// fall on char boundaries of `input`.
    pub fn source<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start..self.end).unwrap_or("")
    }

    /// One-based line of `input` the span starts on.
    pub fn line_number(&self, input: &str) -> usize {
        let start = self.start.min(input.len());
        memchr::memchr_iter(b'\n', &input.as_bytes()[..start]).count() + 1
    }
}
