use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    routing::post,
    Json, Router,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub isbn: String,
    pub cogs: Option<f64>,
    pub date_purchased: Option<NaiveDate>,
    pub sold: Option<NaiveDate>,
    pub payout: Option<f64>,
    pub profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Body of create and update requests. Every field is optional on the wire;
/// create enforces its mandatory fields itself.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookInput {
    pub isbn: Option<String>,
    pub cogs: Option<f64>,
    pub date_purchased: Option<NaiveDate>,
    pub sold: Option<NaiveDate>,
    pub payout: Option<f64>,
    pub profit: Option<f64>,
    pub title: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub title: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Everything the backend would keep in its database, plus the lookup table
/// standing in for the external book-details service.
#[derive(Debug, Default)]
pub struct Store {
    pub books: Vec<Book>,
    pub details: HashMap<String, BookDetails>,
    pub todos: Vec<Todo>,
    /// Number of book-details requests served, hits and misses alike.
    pub details_requests: usize,
}

impl Store {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    /// `count` unsold books with ids `book-0..` and ISBNs `978000000000N`.
    pub fn seeded(count: usize) -> Self {
        let books = (0..count)
            .map(|i| Book {
                id: format!("book-{i}"),
                isbn: format!("978{i:010}"),
                cogs: Some(2.0),
                date_purchased: NaiveDate::from_ymd_opt(2024, 1, 1),
                sold: None,
                payout: None,
                profit: None,
                title: None,
            })
            .collect();
        Self::with_books(books)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    router(Arc::new(RwLock::new(store)))
}

/// Build the router over a shared store the caller can keep inspecting.
pub fn router(db: Db) -> Router {
    Router::new()
        .route("/api/books/all-books", get(list_books))
        .route("/api/books/search", get(search_books))
        .route("/api/books/sold-in-month", get(sold_in_month))
        .route("/api/books/book-details", get(book_details))
        .route("/api/books/inventory-status", get(inventory_status))
        .route("/api/books/active-inventory-count", get(active_inventory_count))
        .route("/api/books/financial-overview", get(financial_overview))
        .route("/api/books/create-book", post(create_book))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", axum::routing::delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, router(db)).await
}

// --- books ---

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

async fn list_books(State(db): State<Db>, Query(params): Query<PageParams>) -> Response {
    if params.limit == 0 {
        return (StatusCode::BAD_REQUEST, "limit must be positive").into_response();
    }
    let store = db.read().await;
    let total = store.books.len();
    let content: Vec<Book> = store
        .books
        .iter()
        .skip(params.page.saturating_mul(params.limit))
        .take(params.limit)
        .cloned()
        .collect();
    Json(json!({
        "content": content,
        "totalElements": total,
        "totalPages": total.div_ceil(params.limit),
        "number": params.page,
        "size": params.limit,
    }))
    .into_response()
}

async fn get_book(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Book>, StatusCode> {
    let store = db.read().await;
    store
        .books
        .iter()
        .find(|b| b.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Deserialize)]
pub struct IsbnParams {
    pub isbn: String,
}

async fn search_books(
    State(db): State<Db>,
    Query(params): Query<IsbnParams>,
) -> Result<Json<Vec<Book>>, StatusCode> {
    let store = db.read().await;
    let found: Vec<Book> = store
        .books
        .iter()
        .filter(|b| b.isbn == params.isbn)
        .cloned()
        .collect();
    if found.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct MonthParams {
    pub year: i32,
    pub month: u32,
}

async fn sold_in_month(State(db): State<Db>, Query(params): Query<MonthParams>) -> Response {
    if !(1..=12).contains(&params.month) {
        return (StatusCode::BAD_REQUEST, "Month must be between 1 and 12").into_response();
    }
    let store = db.read().await;
    let found: Vec<Book> = store
        .books
        .iter()
        .filter(|b| {
            b.sold
                .is_some_and(|d| d.year() == params.year && d.month() == params.month)
        })
        .cloned()
        .collect();
    if found.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(found).into_response()
}

async fn book_details(State(db): State<Db>, Query(params): Query<IsbnParams>) -> Response {
    let mut store = db.write().await;
    store.details_requests += 1;
    match store.details.get(&params.isbn) {
        Some(details) => Json(details.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Book details not found" })),
        )
            .into_response(),
    }
}

async fn inventory_status(State(db): State<Db>) -> Json<serde_json::Value> {
    let store = db.read().await;
    let sold = store.books.iter().filter(|b| b.sold.is_some()).count();
    Json(json!({ "sold": sold, "unsold": store.books.len() - sold }))
}

async fn active_inventory_count(State(db): State<Db>) -> Json<usize> {
    let store = db.read().await;
    Json(store.books.iter().filter(|b| b.sold.is_none()).count())
}

async fn financial_overview(State(db): State<Db>) -> Json<serde_json::Value> {
    let store = db.read().await;
    let cogs: f64 = store.books.iter().filter_map(|b| b.cogs).sum();
    let profit: f64 = store.books.iter().filter_map(|b| b.profit).sum();
    Json(json!({ "cogs": cogs, "profit": profit }))
}

async fn create_book(State(db): State<Db>, Json(input): Json<BookInput>) -> Response {
    let isbn = match input.isbn {
        Some(isbn) if !isbn.trim().is_empty() => isbn,
        _ => return (StatusCode::BAD_REQUEST, "ISBN is a mandatory field.").into_response(),
    };
    if input.cogs.is_none() {
        return (StatusCode::BAD_REQUEST, "COGS is a mandatory field.").into_response();
    }
    let book = Book {
        id: Uuid::new_v4().to_string(),
        isbn,
        cogs: input.cogs,
        date_purchased: input.date_purchased,
        sold: input.sold,
        payout: input.payout,
        profit: input.profit,
        title: input.title,
    };
    tracing::info!(isbn = %book.isbn, id = %book.id, "book created");
    db.write().await.books.push(book.clone());
    (StatusCode::CREATED, Json(book)).into_response()
}

/// Every field is replaced, absent ones included.
async fn update_book(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, StatusCode> {
    let mut store = db.write().await;
    let book = store
        .books
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(isbn) = input.isbn {
        book.isbn = isbn;
    }
    book.cogs = input.cogs;
    book.date_purchased = input.date_purchased;
    book.sold = input.sold;
    book.payout = input.payout;
    book.profit = input.profit;
    book.title = input.title;
    Ok(Json(book.clone()))
}

async fn delete_book(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut store = db.write().await;
    let before = store.books.len();
    store.books.retain(|b| b.id != id);
    if store.books.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

// --- todos ---

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.todos.clone())
}

async fn create_todo(State(db): State<Db>, Json(input): Json<TodoInput>) -> Json<Todo> {
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        description: input.description,
        due_date: input.due_date,
        completed: input.completed,
    };
    db.write().await.todos.push(todo.clone());
    Json(todo)
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    db.write().await.todos.retain(|t| t.id != id);
    StatusCode::OK
}
