use crate::span::Span;
use std::fmt;
use thiserror::Error;

/// Why a single entry could not be classified.
///
/// Every kind is a malformed-entry condition: the entry is dropped and
/// parsing continues unless the parser runs without recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The block has a header but no metadata line.
    MissingMetadata,
    /// No kind keyword matched the metadata line.
    UnknownKind,
    /// The metadata line names no page or location.
    MissingLocation,
    /// A page or location keyword was not followed by a numeric range.
    InvalidLocation,
}

/// A per-entry parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Bytes of the offending entry block
    pub span: Option<Span>,
    /// Zero-based ordinal of the entry in the export
    pub entry: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            entry: 0,
            kind,
        }
    }

    pub fn missing_metadata() -> Self {
        Self::new(ParseErrorKind::MissingMetadata, "entry has no metadata line")
    }

    pub fn unknown_kind(metadata: &str) -> Self {
        Self::new(
            ParseErrorKind::UnknownKind,
            format!("unrecognized clipping kind in '{}'", metadata),
        )
    }

    pub fn missing_location(metadata: &str) -> Self {
        Self::new(
            ParseErrorKind::MissingLocation,
            format!("no page or location in '{}'", metadata),
        )
    }

    pub fn invalid_location(value: &str) -> Self {
        Self::new(
            ParseErrorKind::InvalidLocation,
            format!("invalid location range '{}'", value),
        )
    }

    /// Attach the position of the entry this error belongs to.
    pub fn at_entry(mut self, entry: usize, span: Span) -> Self {
        self.entry = entry;
        self.span = Some(span);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {}: {}", self.entry + 1, self.message)?;
        if let Some(span) = self.span {
            write!(f, " at bytes {}..{}", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Malformed entries collected while parsing in recovery mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// First collected error, if any.
    pub fn first(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    /// Count of errors of one kind.
    pub fn count(&self, kind: ParseErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Failures that abort the whole parse.
#[derive(Error, Debug)]
pub enum Error {
    /// Input bytes are not valid UTF-8
    #[error("input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    Encoding { valid_up_to: usize },

    /// Input has entries but none of them could be classified
    #[error("no recognizable clippings among {entries} entries: {first}")]
    Unrecognized { entries: usize, first: ParseError },

    /// An entry was malformed and recovery is disabled
    #[error("malformed clipping: {0}")]
    Malformed(ParseError),

    /// Output encoding failed
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
