//! Canonical text export writer.
//!
//! Writes parsed books back out in the English export layout, one entry
//! per clipping, grouped by book. Timestamps are not part of the model and
//! are omitted. Parsing the output yields the same books and clippings.

use std::fmt::{self, Write};

use crate::model::{Book, BookClippings, ClippingContent, ClippingKind, Location, LocationKind};
use crate::splitter::DELIMITER;

fn kind_phrase(kind: ClippingKind) -> &'static str {
    match kind {
        ClippingKind::Highlight => "Your Highlight",
        ClippingKind::Note => "Your Note",
        ClippingKind::Bookmark => "Your Bookmark",
        ClippingKind::ArticleClip => "Clip This Article",
    }
}

fn write_header<W: Write>(out: &mut W, book: &Book) -> fmt::Result {
    if book.has_author() {
        write!(out, "{} ({})", book.title, book.author)
    } else if book.title.ends_with(')') {
        // keep a trailing group in the title from reading as the author
        write!(out, "{} ()", book.title)
    } else {
        write!(out, "{}", book.title)
    }
}

fn write_location<W: Write>(out: &mut W, location: &Location) -> fmt::Result {
    match location.kind {
        LocationKind::Page => write!(out, "on page {}", location.from)?,
        LocationKind::Location => write!(out, "at location {}", location.from)?,
    }
    if let Some(to) = location.to {
        write!(out, "-{}", to)?;
    }
    Ok(())
}

fn write_entry<W: Write>(out: &mut W, book: &Book, content: &ClippingContent) -> fmt::Result {
    write_header(out, book)?;
    write!(out, "\n- {} ", kind_phrase(content.kind()))?;
    write_location(out, content.location())?;
    out.write_str("\n\n")?;
    if let Some(text) = content.text() {
        out.write_str(text)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", DELIMITER)
}

/// Write every clipping of every book as an export entry.
pub fn write_export<W: Write>(out: &mut W, books: &[BookClippings]) -> fmt::Result {
    for book in books {
        for content in &book.clippings {
            write_entry(out, &book.book, content)?;
        }
    }
    Ok(())
}

/// Render books as export text.
///
/// Formatting into a `String` never returns an error, so the result of
/// [`write_export`] is not inspected.
pub fn render_export(books: &[BookClippings]) -> String {
    let mut out = String::new();
    let _ = write_export(&mut out, books);
    out
}
