//! Canonical and displayed book lists.
//!
//! Both lists only change after the server has confirmed a change; nothing
//! here is optimistic.

use std::collections::HashSet;

use crate::types::Book;

/// Append every book from `incoming` whose `id` is not already in `existing`,
/// keeping server order. Returns how many were appended.
pub fn merge_page(existing: &mut Vec<Book>, incoming: impl IntoIterator<Item = Book>) -> usize {
    let mut seen: HashSet<String> = existing.iter().map(|b| b.id.clone()).collect();
    let before = existing.len();
    for book in incoming {
        if seen.insert(book.id.clone()) {
            existing.push(book);
        }
    }
    existing.len() - before
}

fn replace_by_id(list: &mut [Book], book: &Book) -> bool {
    match list.iter_mut().find(|b| b.id == book.id) {
        Some(slot) => {
            *slot = book.clone();
            true
        }
        None => false,
    }
}

#[derive(Debug, Default, Clone)]
pub struct ListSync {
    canonical: Vec<Book>,
    displayed: Vec<Book>,
}

impl ListSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetched book, independent of any filter.
    pub fn canonical(&self) -> &[Book] {
        &self.canonical
    }

    /// The filtered selection (search or month results), or a copy of the
    /// canonical list while no filter is active.
    pub fn displayed(&self) -> &[Book] {
        &self.displayed
    }

    /// Merge a fetched page into the canonical list. While no filter is
    /// active the displayed list follows it.
    pub fn merge_page(&mut self, incoming: Vec<Book>, filter_active: bool) -> usize {
        let added = merge_page(&mut self.canonical, incoming);
        if !filter_active {
            self.displayed = self.canonical.clone();
        }
        added
    }

    pub fn show(&mut self, books: Vec<Book>) {
        self.displayed = books;
    }

    pub fn show_canonical(&mut self) {
        self.displayed = self.canonical.clone();
    }

    pub fn apply_create(&mut self, book: Book, filter_active: bool) {
        if !filter_active {
            self.displayed.push(book.clone());
        }
        self.canonical.push(book);
    }

    /// Replace the entry with the same id wholesale. Returns whether the
    /// canonical list held it.
    pub fn apply_update(&mut self, book: &Book) -> bool {
        replace_by_id(&mut self.displayed, book);
        replace_by_id(&mut self.canonical, book)
    }

    /// Returns whether anything was removed.
    pub fn apply_delete(&mut self, id: &str) -> bool {
        let before = self.canonical.len() + self.displayed.len();
        self.canonical.retain(|b| b.id != id);
        self.displayed.retain(|b| b.id != id);
        before != self.canonical.len() + self.displayed.len()
    }
}
