use axum::http::{self, Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use mock_server::{app, app_with, Book, BookDetails, Store, Todo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn sold_book(id: &str, sold: NaiveDate, cogs: f64, payout: f64) -> Book {
    Book {
        id: id.to_string(),
        isbn: format!("978{id:0>10}"),
        cogs: Some(cogs),
        date_purchased: NaiveDate::from_ymd_opt(2024, 1, 1),
        sold: Some(sold),
        payout: Some(payout),
        profit: Some(payout - cogs),
        title: None,
    }
}

// --- listing ---

#[tokio::test]
async fn all_books_pages_through_store() {
    let resp = app_with(Store::seeded(25))
        .oneshot(get("/api/books/all-books?page=1&limit=20"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = body_json(resp).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 5);
    assert_eq!(page["content"][0]["id"], "book-20");
    assert_eq!(page["totalElements"], 25);
}

#[tokio::test]
async fn all_books_defaults_to_first_page() {
    let resp = app_with(Store::seeded(3))
        .oneshot(get("/api/books/all-books"))
        .await
        .unwrap();
    let page: serde_json::Value = body_json(resp).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn all_books_far_past_the_end_is_empty() {
    let resp = app_with(Store::seeded(3))
        .oneshot(get(&format!("/api/books/all-books?page={}&limit=20", usize::MAX)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = body_json(resp).await;
    assert!(page["content"].as_array().unwrap().is_empty());
    assert_eq!(page["totalElements"], 3);
}

// --- search ---

#[tokio::test]
async fn search_exact_isbn() {
    let resp = app_with(Store::seeded(5))
        .oneshot(get("/api/books/search?isbn=9780000000003"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let books: Vec<Book> = body_json(resp).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "book-3");
}

#[tokio::test]
async fn search_without_match_is_404() {
    let resp = app_with(Store::seeded(5))
        .oneshot(get("/api/books/search?isbn=9789999999999"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- sold in month ---

#[tokio::test]
async fn sold_in_month_filters_on_sold_date() {
    let store = Store::with_books(vec![
        sold_book("1", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), 1.0, 5.0),
        sold_book("2", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 1.0, 5.0),
        sold_book("3", NaiveDate::from_ymd_opt(2023, 5, 9).unwrap(), 1.0, 5.0),
    ]);
    let resp = app_with(store)
        .oneshot(get("/api/books/sold-in-month?year=2024&month=5"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let books: Vec<Book> = body_json(resp).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "1");
}

#[tokio::test]
async fn sold_in_month_empty_is_204() {
    let resp = app_with(Store::seeded(4))
        .oneshot(get("/api/books/sold-in-month?year=2024&month=5"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn sold_in_month_rejects_bad_month() {
    let resp = app()
        .oneshot(get("/api/books/sold-in-month?year=2024&month=13"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- details ---

#[tokio::test]
async fn book_details_found_and_missing() {
    let mut store = Store::default();
    store.details.insert(
        "9780441172719".to_string(),
        BookDetails {
            title: Some("Dune".to_string()),
            image_url: None,
        },
    );
    let app = app_with(store);

    let resp = app
        .clone()
        .oneshot(get("/api/books/book-details?isbn=9780441172719"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let details: serde_json::Value = body_json(resp).await;
    assert_eq!(details["title"], "Dune");
    assert!(details["imageUrl"].is_null());

    let resp = app
        .oneshot(get("/api/books/book-details?isbn=0000000000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- summaries ---

#[tokio::test]
async fn summary_endpoints() {
    let mut store = Store::seeded(3);
    store
        .books
        .push(sold_book("9", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), 4.0, 10.0));
    let app = app_with(store);

    let resp = app.clone().oneshot(get("/api/books/inventory-status")).await.unwrap();
    let status: serde_json::Value = body_json(resp).await;
    assert_eq!(status["sold"], 1);
    assert_eq!(status["unsold"], 3);

    let resp = app
        .clone()
        .oneshot(get("/api/books/active-inventory-count"))
        .await
        .unwrap();
    let count: u64 = body_json(resp).await;
    assert_eq!(count, 3);

    let resp = app.oneshot(get("/api/books/financial-overview")).await.unwrap();
    let overview: serde_json::Value = body_json(resp).await;
    assert_eq!(overview["cogs"], 10.0);
    assert_eq!(overview["profit"], 6.0);
}

// --- create ---

#[tokio::test]
async fn create_book_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/books/create-book",
            r#"{"isbn":"9780000000013","cogs":3.0,"datePurchased":"2024-03-01"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let book: Book = body_json(resp).await;
    assert_eq!(book.isbn, "9780000000013");
    assert!(!book.id.is_empty());
    assert_eq!(book.date_purchased, NaiveDate::from_ymd_opt(2024, 3, 1));
}

#[tokio::test]
async fn create_book_requires_isbn_and_cogs() {
    let resp = app()
        .oneshot(json_request("POST", "/api/books/create-book", r#"{"cogs":3.0}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/books/create-book",
            r#"{"isbn":"9780000000013"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update / delete ---

#[tokio::test]
async fn update_book_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/api/books/nope", r#"{"isbn":"x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_book_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/books/nope")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn book_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/books/create-book",
            r#"{"isbn":"9780000000013","cogs":2.0}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Book = body_json(resp).await;
    let id = created.id.clone();

    // update replaces every field
    let body = serde_json::json!({
        "id": id,
        "isbn": "9780000000013",
        "cogs": 2.0,
        "sold": "2024-05-10",
        "payout": 9.0,
        "profit": 7.0
    })
    .to_string();
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/api/books/{id}"), &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Book = body_json(resp).await;
    assert_eq!(updated.profit, Some(7.0));
    assert_eq!(updated.sold, NaiveDate::from_ymd_opt(2024, 5, 10));

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/books/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Book = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/books/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // get after delete is a 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/books/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- todos ---

#[tokio::test]
async fn todo_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/todos", r#"{"title":"Ship orders"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.title, "Ship orders");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/todos/{}", todo.id))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}
