//! Self-describing JSON output.
//!
//! Each clipping is written as an object with an explicit `kind` tag, its
//! `location` (`from`, `to`, `kind`; `to` is `null` for single points) and,
//! except for bookmarks, its `text`:
//!
//! ```json
//! { "kind": "Highlight",
//!   "location": { "from": 10, "to": null, "kind": "Page" },
//!   "text": "This is the highlighted text." }
//! ```
//!
//! The tag comes from [`ClippingKind::label`], so the same result can be
//! written with either label set.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::error::Result;
use crate::model::{BookClippings, ClippingContent, LabelStyle};

/// A value paired with the label style its `kind` tags are written in.
pub struct Labeled<'a, T: ?Sized> {
    value: &'a T,
    style: LabelStyle,
}

impl<'a, T: ?Sized> Labeled<'a, T> {
    pub fn new(value: &'a T, style: LabelStyle) -> Self {
        Self { value, style }
    }
}

impl Serialize for Labeled<'_, ClippingContent> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let content = self.value;
        let text = content.text();
        let fields = if text.is_some() { 3 } else { 2 };

        let mut state = serializer.serialize_struct("ClippingContent", fields)?;
        state.serialize_field("kind", content.kind().label(self.style))?;
        state.serialize_field("location", content.location())?;
        if let Some(text) = text {
            state.serialize_field("text", text)?;
        }
        state.end()
    }
}

impl Serialize for Labeled<'_, BookClippings> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let style = self.style;
        let clippings: Vec<_> = self
            .value
            .clippings
            .iter()
            .map(|c| Labeled::new(c, style))
            .collect();

        let mut state = serializer.serialize_struct("BookClippings", 2)?;
        state.serialize_field("book", &self.value.book)?;
        state.serialize_field("clippings", &clippings)?;
        state.end()
    }
}

impl Serialize for Labeled<'_, [BookClippings]> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let style = self.style;
        serializer.collect_seq(self.value.iter().map(|book| Labeled::new(book, style)))
    }
}

impl Serialize for ClippingContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Labeled::new(self, LabelStyle::Bare).serialize(serializer)
    }
}

/// Encode parsed books as JSON.
pub fn to_json(books: &[BookClippings], style: LabelStyle, pretty: bool) -> Result<String> {
    let labeled = Labeled::new(books, style);
    let json = if pretty {
        serde_json::to_string_pretty(&labeled)?
    } else {
        serde_json::to_string(&labeled)?
    };
    Ok(json)
}

/// Decode JSON written by [`to_json`] with either label style.
pub fn from_json(json: &str) -> Result<Vec<BookClippings>> {
    Ok(serde_json::from_str(json)?)
}
