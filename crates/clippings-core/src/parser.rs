//! Clippings parser: splitter, classifier and aggregator in one pass each.
//!
//! The parser holds only immutable configuration. `parse` borrows it
//! shared, so one parser can serve any number of threads.

use tracing::{debug, trace, warn};

use crate::aggregator::Aggregator;
use crate::classifier::classify_entry;
use crate::error::{Error, ParseErrors, Result};
use crate::model::{ClippingKind, ParseResult};
use crate::recognizer::{KeywordTable, Recognizer};
use crate::splitter::split_entries;

/// Parsed books together with the entries that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// One record per book, in order of first appearance.
    pub books: ParseResult,
    /// Malformed entries, in export order.
    pub errors: ParseErrors,
}

impl ParseOutput {
    /// Check if every entry was classified.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of clippings across all books.
    pub fn clipping_count(&self) -> usize {
        self.books.iter().map(|b| b.clippings.len()).sum()
    }

    /// Number of clippings of one kind across all books.
    pub fn count(&self, kind: ClippingKind) -> usize {
        self.books.iter().map(|b| b.count(kind)).sum()
    }
}

/// Clippings export parser with configurable keywords and error policy.
#[derive(Debug, Clone)]
pub struct Parser {
    recognizer: Recognizer,
    /// Skip malformed entries instead of failing on the first one.
    recover_on_error: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Parser with the standard keyword table and recovery enabled.
    pub fn new() -> Self {
        Self {
            recognizer: Recognizer::default(),
            recover_on_error: true,
        }
    }

    /// Replace the keyword table used to recognize metadata lines.
    pub fn with_keywords(mut self, table: KeywordTable) -> Self {
        self.recognizer = Recognizer::new(table);
        self
    }

    /// Enable or disable error recovery.
    ///
    /// When enabled (default), malformed entries are dropped and reported in
    /// [`ParseOutput::errors`]. When disabled, the first malformed entry
    /// fails the parse with [`Error::Malformed`].
    pub fn with_recovery(mut self, recover: bool) -> Self {
        self.recover_on_error = recover;
        self
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    /// Parse raw bytes, checking they are UTF-8 first.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<ParseOutput> {
        let text = std::str::from_utf8(input).map_err(|e| Error::Encoding {
            valid_up_to: e.valid_up_to(),
        })?;
        self.parse(text)
    }

    /// Parse the full text of an export.
    ///
    /// Empty or blank input gives an empty result. Input whose entries are
    /// all malformed fails with [`Error::Unrecognized`].
    pub fn parse(&self, input: &str) -> Result<ParseOutput> {
        let entries = split_entries(input);
        debug!(entries = entries.len(), bytes = input.len(), "split clippings export");

        let mut aggregator = Aggregator::new();
        let mut errors = ParseErrors::new();

        for entry in &entries {
            match classify_entry(entry, &self.recognizer) {
                Ok(clipping) => {
                    trace!(
                        entry = entry.index,
                        kind = ?clipping.content.kind(),
                        title = %clipping.book.title,
                        "classified clipping"
                    );
                    aggregator.add(clipping);
                }
                Err(error) if !self.recover_on_error => return Err(Error::Malformed(error)),
                Err(error) => {
                    warn!(entry = error.entry, kind = ?error.kind, "skipping clipping: {}", error.message);
                    errors.push(error);
                }
            }
        }

        if aggregator.is_empty() {
            if let Some(first) = errors.first() {
                return Err(Error::Unrecognized {
                    entries: entries.len(),
                    first: first.clone(),
                });
            }
        }

        let books = aggregator.finish();
        debug!(books = books.len(), skipped = errors.len(), "parsed clippings export");

        Ok(ParseOutput { books, errors })
    }
}

/// Parse an export with the default parser.
pub fn parse_clippings(input: &str) -> Result<ParseOutput> {
    Parser::new().parse(input)
}
