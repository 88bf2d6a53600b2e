//! Stateless HTTP request builder and response parser for the inventory API.
//!
//! # Design
//! `InventoryClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Any 2xx status counts as success.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Book, BookDetails, BookPage, FinancialOverview, InventoryStatus, NewBook, NewTodo, Todo,
};

/// Synchronous, stateless client for the book and to-do API.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    base_url: String,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn books_url(&self, rest: &str) -> String {
        format!("{}/api/books/{rest}", self.base_url)
    }

    pub fn build_all_books(&self, page: u32, limit: u32) -> HttpRequest {
        HttpRequest::get(self.books_url(&format!("all-books?page={page}&limit={limit}")))
    }

    pub fn build_get_book(&self, id: &str) -> HttpRequest {
        HttpRequest::get(self.books_url(&urlencoding::encode(id)))
    }

    pub fn build_search_books(&self, isbn: &str) -> HttpRequest {
        HttpRequest::get(self.books_url(&format!("search?isbn={}", urlencoding::encode(isbn))))
    }

    pub fn build_sold_in_month(&self, year: i32, month: u32) -> HttpRequest {
        HttpRequest::get(self.books_url(&format!("sold-in-month?year={year}&month={month}")))
    }

    pub fn build_book_details(&self, isbn: &str) -> HttpRequest {
        HttpRequest::get(self.books_url(&format!(
            "book-details?isbn={}",
            urlencoding::encode(isbn)
        )))
    }

    pub fn build_inventory_status(&self) -> HttpRequest {
        HttpRequest::get(self.books_url("inventory-status"))
    }

    pub fn build_active_inventory_count(&self) -> HttpRequest {
        HttpRequest::get(self.books_url("active-inventory-count"))
    }

    pub fn build_financial_overview(&self) -> HttpRequest {
        HttpRequest::get(self.books_url("financial-overview"))
    }

    pub fn build_create_book(&self, input: &NewBook) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.books_url("create-book"),
            to_json(input)?,
        ))
    }

    /// The full book is sent; the server replaces every field.
    pub fn build_update_book(&self, book: &Book) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.books_url(&urlencoding::encode(&book.id)),
            to_json(book)?,
        ))
    }

    pub fn build_delete_book(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.books_url(&urlencoding::encode(id)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_all_books(&self, response: HttpResponse) -> Result<BookPage, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// A 404 (the backend's answer when no book carries the ISBN) is
    /// `ApiError::NotFound` like any other non-2xx status.
    pub fn parse_search_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// The backend answers 204 with no body when nothing sold that month.
    pub fn parse_sold_in_month(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        check_status(&response)?;
        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        from_json(&response.body)
    }

    pub fn parse_book_details(&self, response: HttpResponse) -> Result<BookDetails, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_inventory_status(
        &self,
        response: HttpResponse,
    ) -> Result<InventoryStatus, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_active_inventory_count(&self, response: HttpResponse) -> Result<u64, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_financial_overview(
        &self,
        response: HttpResponse,
    ) -> Result<FinancialOverview, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/api/todos", self.base_url))
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/api/todos", self.base_url),
            to_json(input)?,
        ))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/todos/{}", self.base_url, urlencoding::encode(id)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}
