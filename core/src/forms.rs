//! Input helpers for adding and editing books.

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::types::{calculate_profit, validate_isbn, Book, NewBook, ISBN_LENGTH};

/// The add-book form. Sticky fields survive a submit so a batch of books
/// bought together can be entered by scanning ISBNs only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddBookForm {
    pub isbn: String,
    pub date_purchased: Option<NaiveDate>,
    pub cogs: f64,
    pub sticky_date_purchased: bool,
    pub sticky_cogs: bool,
}

impl AddBookForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once the ISBN is complete, which is the cue to submit.
    pub fn set_isbn(&mut self, isbn: &str) -> bool {
        self.isbn = isbn.to_string();
        self.isbn.chars().count() == ISBN_LENGTH
    }

    pub fn submit(&mut self) -> Result<NewBook, ApiError> {
        validate_isbn(&self.isbn)?;
        let book = NewBook {
            isbn: std::mem::take(&mut self.isbn),
            date_purchased: self.date_purchased,
            cogs: self.cogs,
        };
        if !self.sticky_date_purchased {
            self.date_purchased = None;
        }
        if !self.sticky_cogs {
            self.cogs = 0.0;
        }
        Ok(book)
    }

    /// Closing the form drops everything, sticky values included.
    pub fn clear(&mut self) {
        self.isbn.clear();
        self.date_purchased = None;
        self.cogs = 0.0;
    }
}

/// Editing copy of a book whose profit always reflects its cogs/payout.
#[derive(Debug, Clone, PartialEq)]
pub struct BookEditor {
    book: Book,
}

impl BookEditor {
    pub fn new(mut book: Book) -> Self {
        book.recompute_profit();
        Self { book }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn profit(&self) -> f64 {
        calculate_profit(self.book.cogs, self.book.payout)
    }

    pub fn set_isbn(&mut self, isbn: &str) {
        self.book.isbn = isbn.to_string();
    }

    pub fn set_date_purchased(&mut self, date: Option<NaiveDate>) {
        self.book.date_purchased = date;
    }

    pub fn set_sold(&mut self, date: Option<NaiveDate>) {
        self.book.sold = date;
    }

    pub fn set_cogs(&mut self, cogs: Option<f64>) {
        self.book.cogs = cogs;
        self.book.recompute_profit();
    }

    pub fn set_payout(&mut self, payout: Option<f64>) {
        self.book.payout = payout;
        self.book.recompute_profit();
    }

    pub fn finish(self) -> Book {
        self.book
    }
}
