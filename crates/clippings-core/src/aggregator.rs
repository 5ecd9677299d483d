//! Groups classified clippings by book.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::{Book, BookClippings, Clipping, ClippingContent, ParseResult};

/// Accumulates clippings per book in order of first appearance.
#[derive(Debug, Default)]
pub struct Aggregator {
    positions: HashMap<Book, usize>,
    books: Vec<BookClippings>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clipping to its book, opening a new record for unseen books.
    pub fn push(&mut self, book: Book, content: ClippingContent) {
        match self.positions.entry(book) {
            Entry::Occupied(slot) => self.books[*slot.get()].clippings.push(content),
            Entry::Vacant(slot) => {
                let position = self.books.len();
                self.books.push(BookClippings {
                    book: slot.key().clone(),
                    clippings: vec![content],
                });
                slot.insert(position);
            }
        }
    }

    pub fn add(&mut self, clipping: Clipping) {
        self.push(clipping.book, clipping.content);
    }

    /// Number of distinct books seen so far.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn finish(self) -> ParseResult {
        self.books
    }
}

impl Extend<Clipping> for Aggregator {
    fn extend<I: IntoIterator<Item = Clipping>>(&mut self, iter: I) {
        for clipping in iter {
            self.add(clipping);
        }
    }
}

impl FromIterator<Clipping> for Aggregator {
    fn from_iter<I: IntoIterator<Item = Clipping>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(iter);
        aggregator
    }
}

/// Order books by author, then title. The sort is stable and leaves the
/// clippings inside each book untouched.
pub fn sort_by_book(books: &mut [BookClippings]) {
    books.sort_by(|a, b| {
        (&a.book.author, &a.book.title).cmp(&(&b.book.author, &b.book.title))
    });
}
