//! Metadata line recognizer.
//!
//! The second line of every entry carries the clipping kind, where it sits
//! in the book and when it was taken, separated by `|`:
//!
//! ```text
//! - Your Highlight on page 12 | Location 180-182 | Added on Monday, 3 May 2021 10:00:00
//! - Your Note at location 1213 | Added on Sunday, 12 July 2015 17:36:17
//! - Highlight Loc. 1234-36 | Added on Tuesday, 4 January 2011, 09:12 PM
//! ```
//!
//! Recognition is table driven. Kind keywords are matched as whole words in
//! the first segment, in table order. Locations are an addressing keyword
//! followed by `N` or `N-M`. Timestamp segments are skipped. Supporting a new
//! export language means adding rows to [`KeywordTable`].

use crate::error::ParseError;
use crate::model::{ClippingKind, Location, LocationKind};

/// Kind keywords in priority order. Bookmarks and article clips come first
/// so their phrases win over the generic ones.
const STANDARD_KINDS: &[(ClippingKind, &str)] = &[
    (ClippingKind::Bookmark, "bookmark"),
    (ClippingKind::Bookmark, "marcador"),
    (ClippingKind::Bookmark, "lesezeichen"),
    (ClippingKind::Bookmark, "signet"),
    (ClippingKind::Bookmark, "segnalibro"),
    (ClippingKind::ArticleClip, "clip this article"),
    (ClippingKind::Note, "note"),
    (ClippingKind::Note, "nota"),
    (ClippingKind::Note, "notiz"),
    (ClippingKind::Highlight, "highlight"),
    (ClippingKind::Highlight, "subrayado"),
    (ClippingKind::Highlight, "markierung"),
    (ClippingKind::Highlight, "surlignement"),
    (ClippingKind::Highlight, "evidenziazione"),
    (ClippingKind::Highlight, "destaque"),
];

const STANDARD_ADDRESSES: &[(LocationKind, &str)] = &[
    (LocationKind::Page, "page"),
    (LocationKind::Page, "p"),
    (LocationKind::Page, "página"),
    (LocationKind::Page, "seite"),
    (LocationKind::Page, "pagina"),
    (LocationKind::Location, "location"),
    (LocationKind::Location, "loc"),
    (LocationKind::Location, "posición"),
    (LocationKind::Location, "position"),
    (LocationKind::Location, "emplacement"),
    (LocationKind::Location, "posizione"),
    (LocationKind::Location, "posição"),
];

const STANDARD_TIMESTAMPS: &[&str] = &[
    "added on",
    "añadido el",
    "hinzugefügt am",
    "ajouté le",
    "aggiunto",
    "adicionado",
];

/// Keyword tables driving the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    kinds: Vec<(ClippingKind, Vec<String>)>,
    addresses: Vec<(LocationKind, String)>,
    timestamps: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl KeywordTable {
    /// A table with no keywords at all.
    pub fn empty() -> Self {
        Self {
            kinds: Vec::new(),
            addresses: Vec::new(),
            timestamps: Vec::new(),
        }
    }

    /// English exports plus the common localized variants.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for &(kind, phrase) in STANDARD_KINDS {
            table = table.with_kind(kind, phrase);
        }
        for &(kind, word) in STANDARD_ADDRESSES {
            table = table.with_address(kind, word);
        }
        for &prefix in STANDARD_TIMESTAMPS {
            table = table.with_timestamp_prefix(prefix);
        }
        table
    }

    /// Add a kind phrase with the lowest priority so far.
    pub fn with_kind(mut self, kind: ClippingKind, phrase: &str) -> Self {
        let words = words(phrase);
        if !words.is_empty() {
            self.kinds.push((kind, words));
        }
        self
    }

    /// Add a word that introduces a page or location number.
    pub fn with_address(mut self, kind: LocationKind, word: &str) -> Self {
        self.addresses.push((kind, normalize_address(word)));
        self
    }

    /// Add a prefix that marks a timestamp segment.
    pub fn with_timestamp_prefix(mut self, prefix: &str) -> Self {
        self.timestamps.push(prefix.trim().to_lowercase());
        self
    }

    /// First kind whose phrase occurs as consecutive words in `segment`.
    pub fn detect_kind(&self, segment: &str) -> Option<ClippingKind> {
        let tokens = words(segment);
        self.kinds
            .iter()
            .find(|(_, phrase)| tokens.windows(phrase.len()).any(|w| w == phrase.as_slice()))
            .map(|(kind, _)| *kind)
    }

    /// Addressing scheme introduced by `word`, if it is a known keyword.
    pub fn address_kind(&self, word: &str) -> Option<LocationKind> {
        let word = normalize_address(word);
        self.addresses
            .iter()
            .find(|(_, keyword)| *keyword == word)
            .map(|(kind, _)| *kind)
    }

    pub fn is_timestamp(&self, segment: &str) -> bool {
        let segment = segment.trim().to_lowercase();
        self.timestamps
            .iter()
            .any(|prefix| segment.starts_with(prefix.as_str()))
    }
}

/// Lowercased alphanumeric words of `text`.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn normalize_address(word: &str) -> String {
    word.trim()
        .trim_end_matches(['.', ':', ','])
        .to_lowercase()
}

/// Parse `N` or `N-M` (hyphen or en dash). Surrounding punctuation such as
/// a trailing comma is ignored.
pub fn parse_range(token: &str) -> Option<(u32, Option<u32>)> {
    let token = token.trim().trim_end_matches([',', ';', '.', ')']);
    match token.split_once(['-', '–']) {
        Some((from, to)) => Some((parse_number(from)?, Some(parse_number(to)?))),
        None => Some((parse_number(token)?, None)),
    }
}

fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Kind and location recovered from a metadata line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub kind: ClippingKind,
    pub location: Location,
}

/// Recognizes the metadata line of an entry.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    table: KeywordTable,
}

impl Recognizer {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Classify a metadata line.
    pub fn recognize(&self, metadata: &str) -> Result<Metadata, ParseError> {
        let head = metadata.split('|').next().unwrap_or(metadata);
        let kind = self
            .table
            .detect_kind(head)
            .ok_or_else(|| ParseError::unknown_kind(metadata.trim()))?;
        let location = self.locate(metadata)?;

        Ok(Metadata { kind, location })
    }

    /// Find the first addressing keyword followed by a valid range.
    pub fn locate(&self, metadata: &str) -> Result<Location, ParseError> {
        let mut invalid: Option<&str> = None;

        for segment in metadata.split('|') {
            if self.table.is_timestamp(segment) {
                continue;
            }

            let mut tokens = segment.split_whitespace().peekable();
            while let Some(token) = tokens.next() {
                let Some(kind) = self.table.address_kind(token) else {
                    continue;
                };

                match tokens.peek() {
                    Some(next) => match parse_range(next) {
                        Some((from, to)) => return Ok(Location::new(kind, from, to)),
                        None => {
                            invalid.get_or_insert(*next);
                        }
                    },
                    None => {
                        invalid.get_or_insert(token);
                    }
                }
            }
        }

        Err(match invalid {
            Some(value) => ParseError::invalid_location(value),
            None => ParseError::missing_location(metadata.trim()),
        })
    }
}
