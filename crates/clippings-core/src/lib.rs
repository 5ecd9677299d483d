//! # Clippings Core
//!
//! Parser for the plain-text clippings exports written by e-readers: the
//! highlights, notes, bookmarks and article clips of every book, separated
//! by `==========` lines.
//!
//! ## Quick Start
//!
//! ```rust
//! use clippings_core::{parse_clippings, ClippingKind, Location};
//!
//! let input = "The Great Book (Jane Author)\n\
//!              - Your Highlight on Page 10 | Added on Sunday, 12 July 2015 17:36:17\n\
//!              \n\
//!              This is the highlighted text.\n\
//!              ==========\n";
//!
//! let output = parse_clippings(input).unwrap();
//! let book = &output.books[0];
//!
//! assert_eq!(book.book.author, "Jane Author");
//! assert_eq!(book.clippings[0].kind(), ClippingKind::Highlight);
//! assert_eq!(*book.clippings[0].location(), Location::page(10));
//! ```
//!
//! ## Error Recovery
//!
//! Malformed entries are skipped and reported next to the result:
//!
//! ```rust
//! use clippings_core::Parser;
//!
//! let input = "Book (Author)\n- Your Note at location 5\n\nok\n==========\n\
//!              Book (Author)\n- Your Doodle at location 6\n\n==========\n";
//! let output = Parser::new().parse(input).unwrap();
//!
//! println!("Clippings: {}, Skipped: {}", output.clipping_count(), output.errors.len());
//! ```
//!
//! ## Stages
//!
//! - [`splitter`] cuts the export into entry blocks
//! - [`classifier`] extracts book, kind, location and text from a block
//! - [`aggregator`] groups clippings by book in order of first appearance

pub mod aggregator;
pub mod classifier;
pub mod encode;
pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod recognizer;
pub mod render;
pub mod span;
pub mod splitter;

pub use aggregator::{sort_by_book, Aggregator};
pub use classifier::classify_entry;
pub use encode::{from_json, to_json};
pub use error::{Error, ParseError, ParseErrorKind, ParseErrors};
pub use model::{
    Book, BookClippings, BookKey, Clipping, ClippingContent, ClippingKind, LabelStyle, Location,
    LocationKind, ParseResult,
};
pub use parser::{parse_clippings, ParseOutput, Parser};
pub use recognizer::{KeywordTable, Recognizer};
pub use render::render_export;
pub use splitter::{split_entries, RawEntry};
