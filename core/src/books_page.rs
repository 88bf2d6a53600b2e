//! The books page: canonical list, paging, search/filter and details modal
//! as one owned aggregate.
//!
//! # Design
//! Every user action is a method that settles the state synchronously and
//! returns the request (if any) the host must execute. Every response comes
//! back through [`BooksPage::complete`], which is the only place server data
//! enters the page. Nothing is changed before the server confirms it.

use crate::cache::{DetailsCache, DetailsLookup};
use crate::client::InventoryClient;
use crate::effect::{Outcome, Outgoing};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::pagination::PageCursor;
use crate::session::SessionStore;
use crate::sync::ListSync;
use crate::types::{validate_isbn, Book, BookDetails, NewBook};
use crate::view::{ViewMode, ViewState};

/// Identifies an outstanding books-page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooksTicket {
    Page { generation: u64 },
    Search { generation: u64 },
    Filter { generation: u64, year: i32, month: u32 },
    Create,
    Update,
    Delete { id: String },
    Details { isbn: String },
}

pub type BooksRequest = Outgoing<BooksTicket>;

/// State of the "view more" dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsModal {
    /// ISBN of the most recent `view_details`; only its response may change
    /// the dialog.
    pub isbn: Option<String>,
    pub open: bool,
    pub loading: bool,
    pub details: Option<BookDetails>,
}

/// The books page of the dashboard.
///
/// Holds the loaded listing, the search/filter view over it, the paging
/// cursor and the details dialog. Requests go out as [`BooksRequest`]s and
/// their results come back through [`BooksPage::complete`].
pub struct BooksPage<S> {
    client: InventoryClient,
    cache: DetailsCache<S>,
    lists: ListSync,
    cursor: PageCursor,
    view: ViewState,
    modal: DetailsModal,
    unmounted: bool,
}

impl<S: SessionStore> BooksPage<S> {
    pub fn new(client: InventoryClient, cache: DetailsCache<S>) -> Self {
        Self {
            client,
            cache,
            lists: ListSync::new(),
            cursor: PageCursor::default(),
            view: ViewState::default(),
            modal: DetailsModal::default(),
            unmounted: false,
        }
    }

    pub fn canonical(&self) -> &[Book] {
        self.lists.canonical()
    }

    /// The filtered selection. Empty after a failed search or filter.
    pub fn displayed(&self) -> &[Book] {
        self.lists.displayed()
    }

    /// Rows to render: the selection while a filter is active, the canonical
    /// list otherwise.
    pub fn rendered(&self) -> &[Book] {
        if self.view.is_filter_active() {
            self.lists.displayed()
        } else {
            self.lists.canonical()
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn is_filter_active(&self) -> bool {
        self.view.is_filter_active()
    }

    pub fn search_term(&self) -> &str {
        self.view.search_term()
    }

    /// Keep the search box contents without searching.
    pub fn set_search_term(&mut self, term: &str) {
        self.view.set_search_term(term);
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn details_modal(&self) -> &DetailsModal {
        &self.modal
    }

    pub fn cache(&self) -> &DetailsCache<S> {
        &self.cache
    }

    pub fn mount(&mut self) -> Option<BooksRequest> {
        tracing::debug!("books page mounted, initiating initial fetch");
        self.unmounted = false;
        self.load_next_page()
    }

    /// Completions that arrive after this are discarded.
    pub fn unmount(&mut self) {
        self.unmounted = true;
        self.view.next_generation();
        self.cursor.abandon();
    }

    pub fn on_scroll(&mut self, at_bottom: bool) -> Option<BooksRequest> {
        if !at_bottom {
            return None;
        }
        self.load_next_page()
    }

    /// No-op while a page is loading, the listing is exhausted, or a
    /// search/filter result is shown.
    pub fn load_next_page(&mut self) -> Option<BooksRequest> {
        if self.unmounted || self.view.is_filter_active() {
            return None;
        }
        let (page, generation) = self.cursor.begin()?;
        tracing::debug!(page, "fetching books page");
        Some(Outgoing::new(
            BooksTicket::Page { generation },
            self.client.build_all_books(page, self.cursor.page_size()),
        ))
    }

    pub fn search(&mut self, isbn: &str) -> Option<BooksRequest> {
        self.view.set_search_term(isbn);
        if isbn.is_empty() {
            tracing::debug!("empty search term, clearing selection");
            self.view.next_generation();
            self.clear_selection();
            return None;
        }
        let generation = self.view.next_generation();
        Some(Outgoing::new(
            BooksTicket::Search { generation },
            self.client.build_search_books(isbn),
        ))
    }

    pub fn filter_by_month(&mut self, year: i32, month: u32) -> Result<BooksRequest, ApiError> {
        let generation = self.view.next_generation();
        if !(1..=12).contains(&month) {
            let err = ApiError::Validation(format!("month must be between 1 and 12, got {month}"));
            tracing::error!(year, month, error = %err, "rejected month filter");
            self.clear_selection();
            return Err(err);
        }
        Ok(Outgoing::new(
            BooksTicket::Filter {
                generation,
                year,
                month,
            },
            self.client.build_sold_in_month(year, month),
        ))
    }

    pub fn reset(&mut self) {
        self.lists.show_canonical();
        self.view.reset();
    }

    fn clear_selection(&mut self) {
        self.lists.show(Vec::new());
        self.view.deactivate();
    }

    /// Rejects an incomplete ISBN before anything is sent.
    pub fn create_book(&mut self, book: &NewBook) -> Result<BooksRequest, ApiError> {
        validate_isbn(&book.isbn)?;
        let request = self.client.build_create_book(book)?;
        Ok(Outgoing::new(BooksTicket::Create, request))
    }

    /// Sends the full book with its profit brought in line with cogs/payout.
    pub fn update_book(&mut self, mut book: Book) -> Result<BooksRequest, ApiError> {
        book.recompute_profit();
        tracing::debug!(id = %book.id, "submitting edited book");
        let request = self.client.build_update_book(&book)?;
        Ok(Outgoing::new(BooksTicket::Update, request))
    }

    pub fn delete_book(&mut self, id: &str) -> BooksRequest {
        Outgoing::new(
            BooksTicket::Delete { id: id.to_string() },
            self.client.build_delete_book(id),
        )
    }

    /// Open the details dialog; returns a request only on a cache miss with
    /// no identical fetch outstanding.
    pub fn view_details(&mut self, isbn: &str) -> Option<BooksRequest> {
        self.modal.isbn = Some(isbn.to_string());
        match self.cache.lookup(isbn) {
            DetailsLookup::Hit(details) => {
                self.modal = DetailsModal {
                    isbn: Some(isbn.to_string()),
                    open: true,
                    loading: false,
                    details: Some(details),
                };
                None
            }
            DetailsLookup::Joined => {
                self.modal.loading = true;
                None
            }
            DetailsLookup::Fetch(request) => {
                self.modal.loading = true;
                Some(Outgoing::new(
                    BooksTicket::Details {
                        isbn: isbn.to_string(),
                    },
                    request,
                ))
            }
        }
    }

    pub fn close_details(&mut self) {
        self.modal.open = false;
    }

    pub fn complete(
        &mut self,
        ticket: BooksTicket,
        response: Result<HttpResponse, ApiError>,
    ) -> Outcome {
        if self.unmounted {
            tracing::debug!(?ticket, "page unmounted, discarding response");
            return Outcome::Discarded;
        }
        match ticket {
            BooksTicket::Page { generation } => self.complete_page(generation, response),
            BooksTicket::Search { generation } => {
                let result = response.and_then(|r| self.client.parse_search_books(r));
                self.complete_view(generation, ViewMode::SearchResult, result, "searching books")
            }
            BooksTicket::Filter {
                generation,
                year,
                month,
            } => {
                let result = response.and_then(|r| self.client.parse_sold_in_month(r));
                self.complete_view(
                    generation,
                    ViewMode::MonthFilter { year, month },
                    result,
                    "fetching filtered books",
                )
            }
            BooksTicket::Create => match response.and_then(|r| self.client.parse_create_book(r)) {
                Ok(book) => {
                    tracing::info!(id = %book.id, "book added");
                    let active = self.view.is_filter_active();
                    self.lists.apply_create(book, active);
                    Outcome::Applied
                }
                Err(err) => failed("adding book", err),
            },
            BooksTicket::Update => match response.and_then(|r| self.client.parse_update_book(r)) {
                Ok(book) => {
                    if !self.lists.apply_update(&book) {
                        tracing::debug!(id = %book.id, "updated book is not loaded locally");
                    }
                    Outcome::Applied
                }
                Err(err) => failed("updating book", err),
            },
            BooksTicket::Delete { id } => {
                match response.and_then(|r| self.client.parse_delete_book(r)) {
                    Ok(()) => {
                        self.lists.apply_delete(&id);
                        Outcome::Applied
                    }
                    Err(err) => failed("deleting book", err),
                }
            }
            BooksTicket::Details { isbn } => {
                let resolved = self.cache.resolve(&isbn, response);
                if self.modal.isbn.as_deref() != Some(isbn.as_str()) {
                    tracing::debug!(%isbn, "details superseded by a later selection");
                    return match resolved.result {
                        Ok(_) => Outcome::Discarded,
                        Err(err) => Outcome::Failed(err),
                    };
                }
                self.modal.loading = false;
                match resolved.result {
                    Ok(details) => {
                        self.modal.open = true;
                        self.modal.details = Some(details);
                        Outcome::Applied
                    }
                    Err(err) => Outcome::Failed(err),
                }
            }
        }
    }

    fn complete_page(
        &mut self,
        generation: u64,
        response: Result<HttpResponse, ApiError>,
    ) -> Outcome {
        if !self.cursor.is_current(generation) {
            tracing::debug!(generation, "discarding stale page response");
            return Outcome::Discarded;
        }
        match response.and_then(|r| self.client.parse_all_books(r)) {
            Ok(page) => {
                let returned = page.content.len();
                let active = self.view.is_filter_active();
                let added = self.lists.merge_page(page.content, active);
                self.cursor.succeed(returned);
                tracing::debug!(
                    returned,
                    added,
                    next_page = self.cursor.page(),
                    has_more = self.cursor.has_more(),
                    "merged books page"
                );
                Outcome::Applied
            }
            Err(err) => {
                self.cursor.fail();
                failed("fetching books", err)
            }
        }
    }

    fn complete_view(
        &mut self,
        generation: u64,
        mode: ViewMode,
        result: Result<Vec<Book>, ApiError>,
        action: &str,
    ) -> Outcome {
        if !self.view.is_current(generation) {
            tracing::debug!(generation, "discarding superseded {action} response");
            return Outcome::Discarded;
        }
        match result {
            Ok(books) => {
                tracing::debug!(results = books.len(), ?mode, "view updated");
                self.lists.show(books);
                self.view.enter(mode);
                Outcome::Applied
            }
            Err(err) => {
                self.clear_selection();
                failed(action, err)
            }
        }
    }
}

fn failed(action: &str, err: ApiError) -> Outcome {
    tracing::error!(error = %err, "error {action}");
    Outcome::Failed(err)
}
