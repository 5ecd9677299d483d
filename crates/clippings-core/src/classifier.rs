//! Entry classifier and field extractor.
//!
//! An entry block has three parts:
//!
//! ```text
//! Flow (Mihaly Csikszentmihalyi)                     <- header
//! - Your Highlight at location 1213-1214 | Added on  <- metadata
//!
//! The reason it is possible to achieve ...           <- body
//! ```

use crate::error::ParseError;
use crate::lexer::{Line, BOM};
use crate::model::{Book, Clipping, ClippingContent};
use crate::recognizer::Recognizer;
use crate::splitter::RawEntry;

/// Split a header line into title and author.
///
/// The author is the last balanced parenthesized group that closes the
/// line, so titles may contain parentheses of their own. Without such a
/// group the whole line is the title and the author is empty.
pub fn split_header(line: &str) -> (&str, &str) {
    let line = line.trim_start_matches(BOM).trim();

    let Some(inner_end) = line.strip_suffix(')').map(str::len) else {
        return (line, "");
    };

    let mut depth = 0usize;
    for (idx, c) in line[..inner_end].char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' if depth == 0 => {
                let title = line[..idx].trim_end();
                if title.is_empty() {
                    return (line, "");
                }
                return (title, line[idx + 1..inner_end].trim());
            }
            '(' => depth -= 1,
            _ => {}
        }
    }

    (line, "")
}

/// Body text: the lines after the metadata line, joined and trimmed.
///
/// Carriage returns left over from doubly converted line endings are
/// dropped from every line.
fn body_text(lines: &[Line<'_>]) -> String {
    let first = lines.iter().position(|line| !line.is_blank());
    let last = lines.iter().rposition(|line| !line.is_blank());

    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last]
            .iter()
            .map(|line| line.text.trim_end_matches('\r'))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
        _ => String::new(),
    }
}

/// Classify one raw entry block.
///
/// Errors carry the entry ordinal and span of the block.
pub fn classify_entry(entry: &RawEntry<'_>, recognizer: &Recognizer) -> Result<Clipping, ParseError> {
    classify_lines(entry.content_lines(), recognizer)
        .map_err(|error| error.at_entry(entry.index, entry.span))
}

fn classify_lines(lines: &[Line<'_>], recognizer: &Recognizer) -> Result<Clipping, ParseError> {
    let (header, rest) = lines.split_first().ok_or_else(ParseError::missing_metadata)?;
    let (metadata, body) = rest
        .split_first()
        .filter(|(metadata, _)| !metadata.is_blank())
        .ok_or_else(ParseError::missing_metadata)?;

    let (title, author) = split_header(header.text);
    let recognized = recognizer.recognize(metadata.trimmed())?;

    let text = if recognized.kind.has_text() {
        body_text(body)
    } else {
        String::new()
    };

    Ok(Clipping {
        book: Book::new(title, author),
        content: ClippingContent::new(recognized.kind, recognized.location, text),
    })
}
