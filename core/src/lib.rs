//! Client core for the book inventory dashboard.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the stateless
//! [`InventoryClient`] sit the stateful pieces of the dashboard: the books
//! page (paging, search, month filter, details), the to-do list and the
//! summary cards.
//!
//! # Design
//! - Stateful components hand out [`Outgoing`] requests tagged with a ticket;
//!   the host executes them in any order and returns each result through the
//!   component's `complete`, which yields an [`Outcome`].
//! - Server data only enters client state after a 2xx response.
//! - Stale search/filter/page responses are recognised by generation and
//!   dropped.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod books_page;
pub mod cache;
pub mod client;
pub mod effect;
pub mod error;
pub mod forms;
pub mod http;
pub mod pagination;
pub mod session;
pub mod summary;
pub mod sync;
pub mod todos;
pub mod types;
pub mod view;

pub use books_page::{BooksPage, BooksTicket, DetailsModal};
pub use cache::{DetailsCache, DetailsLookup};
pub use client::InventoryClient;
pub use effect::{Outcome, Outgoing};
pub use error::ApiError;
pub use forms::{AddBookForm, BookEditor};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{MemorySessionStore, SessionStore};
pub use summary::{Dashboard, SummaryTicket};
pub use todos::{TodoList, TodoTicket};
pub use types::{
    Book, BookDetails, BookPage, FinancialOverview, InventoryStatus, NewBook, NewTodo, Todo,
    PAGE_SIZE,
};
pub use view::ViewMode;
