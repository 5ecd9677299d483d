//! Typed representation of a parsed clippings export.
//!
//! All values are built once per parse and never mutated afterwards.
//! Equality is structural; there is no identity beyond the field values.
//!
//! The `kind` tag written for each clipping is a presentation concern: the
//! parser classifies entries into [`ClippingKind`] and the label for a kind
//! is looked up in [`ClippingKind::label`], so a release can switch label
//! sets without touching classification.

use serde::{Deserialize, Serialize};

/// Identifies a book and groups its clippings.
///
/// Two entries belong to the same book when both fields match exactly.
/// An export line without a parenthesized author yields an empty `author`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
}

/// Alias matching the grouping role of [`Book`].
pub type BookKey = Book;

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Whether the export named an author for this book.
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

/// Addressing scheme the reading app used for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    /// Printed page number.
    Page,
    /// Device-specific location index.
    Location,
}

/// A position or range within a book.
///
/// `to` is `None` for a single point. A `to` smaller than `from` is kept as
/// it was exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub from: u32,
    pub to: Option<u32>,
    pub kind: LocationKind,
}

impl Location {
    pub const fn new(kind: LocationKind, from: u32, to: Option<u32>) -> Self {
        Self { from, to, kind }
    }

    pub const fn page(from: u32) -> Self {
        Self::new(LocationKind::Page, from, None)
    }

    pub const fn location(from: u32) -> Self {
        Self::new(LocationKind::Location, from, None)
    }

    /// Extend this location into a range ending at `to`.
    pub fn to(mut self, to: u32) -> Self {
        self.to = Some(to);
        self
    }

    /// True when the range end precedes its start.
    pub fn is_inverted(&self) -> bool {
        matches!(self.to, Some(to) if to < self.from)
    }
}

/// Which label set the `kind` tag is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// `Highlight`, `Note`, `Bookmark`, `ArticleClip`.
    #[default]
    Bare,
    /// `ClippingHighlight`, `ClippingNote`, ... (earlier releases).
    Prefixed,
}

/// The closed set of clipping kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClippingKind {
    Highlight,
    Note,
    Bookmark,
    ArticleClip,
}

/// Serialized labels per kind: `(kind, bare, prefixed)`.
const LABELS: [(ClippingKind, &str, &str); 4] = [
    (ClippingKind::Highlight, "Highlight", "ClippingHighlight"),
    (ClippingKind::Note, "Note", "ClippingNote"),
    (ClippingKind::Bookmark, "Bookmark", "ClippingBookmark"),
    (ClippingKind::ArticleClip, "ArticleClip", "ClippingArticleClip"),
];

impl ClippingKind {
    pub const ALL: [ClippingKind; 4] = [
        ClippingKind::Highlight,
        ClippingKind::Note,
        ClippingKind::Bookmark,
        ClippingKind::ArticleClip,
    ];

    /// External name of this kind under the given label style.
    pub fn label(self, style: LabelStyle) -> &'static str {
        let (_, bare, prefixed) = LABELS[self.index()];
        match style {
            LabelStyle::Bare => bare,
            LabelStyle::Prefixed => prefixed,
        }
    }

    /// Row of this kind in the label table.
    fn index(self) -> usize {
        match self {
            ClippingKind::Highlight => 0,
            ClippingKind::Note => 1,
            ClippingKind::Bookmark => 2,
            ClippingKind::ArticleClip => 3,
        }
    }

    /// Look a kind up by either label set.
    pub fn from_label(label: &str) -> Option<Self> {
        LABELS
            .iter()
            .find(|(_, bare, prefixed)| *bare == label || *prefixed == label)
            .map(|(kind, _, _)| *kind)
    }

    /// Whether clippings of this kind carry body text.
    pub fn has_text(self) -> bool {
        !matches!(self, ClippingKind::Bookmark)
    }
}

/// One classified clipping.
///
/// Serializes as an object with a `kind` tag (bare labels); see
/// [`crate::encode`] for the prefixed label set. Both label sets are
/// accepted when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum ClippingContent {
    #[serde(alias = "ClippingHighlight")]
    Highlight { location: Location, text: String },
    #[serde(alias = "ClippingNote")]
    Note { location: Location, text: String },
    #[serde(alias = "ClippingBookmark")]
    Bookmark { location: Location },
    #[serde(alias = "ClippingArticleClip")]
    ArticleClip { location: Location, text: String },
}

impl ClippingContent {
    /// Build a clipping of `kind`. Text is dropped for bookmarks.
    pub fn new(kind: ClippingKind, location: Location, text: impl Into<String>) -> Self {
        match kind {
            ClippingKind::Highlight => ClippingContent::Highlight {
                location,
                text: text.into(),
            },
            ClippingKind::Note => ClippingContent::Note {
                location,
                text: text.into(),
            },
            ClippingKind::Bookmark => ClippingContent::Bookmark { location },
            ClippingKind::ArticleClip => ClippingContent::ArticleClip {
                location,
                text: text.into(),
            },
        }
    }

    pub fn kind(&self) -> ClippingKind {
        match self {
            ClippingContent::Highlight { .. } => ClippingKind::Highlight,
            ClippingContent::Note { .. } => ClippingKind::Note,
            ClippingContent::Bookmark { .. } => ClippingKind::Bookmark,
            ClippingContent::ArticleClip { .. } => ClippingKind::ArticleClip,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            ClippingContent::Highlight { location, .. }
            | ClippingContent::Note { location, .. }
            | ClippingContent::Bookmark { location }
            | ClippingContent::ArticleClip { location, .. } => location,
        }
    }

    /// Body text, `None` for bookmarks.
    pub fn text(&self) -> Option<&str> {
        match self {
            ClippingContent::Highlight { text, .. }
            | ClippingContent::Note { text, .. }
            | ClippingContent::ArticleClip { text, .. } => Some(text.as_str()),
            ClippingContent::Bookmark { .. } => None,
        }
    }
}

/// A classified entry before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipping {
    pub book: Book,
    pub content: ClippingContent,
}

/// All clippings of one book, in export order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookClippings {
    pub book: Book,
    pub clippings: Vec<ClippingContent>,
}

impl BookClippings {
    /// Number of clippings of the given kind.
    pub fn count(&self, kind: ClippingKind) -> usize {
        self.clippings.iter().filter(|c| c.kind() == kind).count()
    }
}

/// One record per distinct book, in order of first appearance.
pub type ParseResult = Vec<BookClippings>;
