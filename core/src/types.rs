//! Domain DTOs for the inventory API.
//!
//! # Design
//! These types mirror the backend's JSON schema (camelCase keys, `yyyy-MM-dd`
//! dates) but are defined independently of the mock server. Integration tests
//! catch any schema drift between the two crates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Number of books requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Length of a complete ISBN-13.
pub const ISBN_LENGTH: usize = 13;

/// Reject an ISBN that is not exactly 13 characters long.
pub fn validate_isbn(isbn: &str) -> Result<(), ApiError> {
    let len = isbn.chars().count();
    if len == ISBN_LENGTH {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "ISBN must be {ISBN_LENGTH} characters, got {len}"
        )))
    }
}

/// `payout - cogs`, treating a missing operand as zero.
pub fn calculate_profit(cogs: Option<f64>, payout: Option<f64>) -> f64 {
    payout.unwrap_or(0.0) - cogs.unwrap_or(0.0)
}

/// One inventory item as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub isbn: String,
    #[serde(default)]
    pub date_purchased: Option<NaiveDate>,
    #[serde(default)]
    pub cogs: Option<f64>,
    /// Date the book was sold; `None` while it is still in inventory.
    #[serde(default)]
    pub sold: Option<NaiveDate>,
    #[serde(default)]
    pub payout: Option<f64>,
    #[serde(default)]
    pub profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Book {
    pub fn is_sold(&self) -> bool {
        self.sold.is_some()
    }

    /// Bring `profit` back in line with `cogs` and `payout`.
    pub fn recompute_profit(&mut self) {
        self.profit = Some(calculate_profit(self.cogs, self.payout));
    }
}

/// Request payload for creating a book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub isbn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_purchased: Option<NaiveDate>,
    pub cogs: f64,
}

/// One page of the paginated book listing. Only `content` is required; the
/// remaining page metadata is informational.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookPage {
    pub content: Vec<Book>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

/// Detail payload looked up by ISBN (title, cover image, and whatever else
/// the details endpoint returns).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InventoryStatus {
    pub sold: u64,
    pub unsold: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FinancialOverview {
    pub cogs: f64,
    pub profit: f64,
}

/// A single to-do item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Request payload for creating a to-do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_reads_camel_case_and_dates() {
        let json = r#"{
            "id": "b1",
            "isbn": "9780000000013",
            "datePurchased": "2024-03-02",
            "cogs": 4.5,
            "sold": null,
            "payout": null,
            "profit": null
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.date_purchased, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert!(!book.is_sold());
        assert!(book.title.is_none());
    }

    #[test]
    fn book_writes_dates_as_plain_days() {
        let book = Book {
            id: "b1".to_string(),
            isbn: "9780000000013".to_string(),
            date_purchased: NaiveDate::from_ymd_opt(2024, 1, 9),
            cogs: Some(3.0),
            sold: NaiveDate::from_ymd_opt(2024, 5, 20),
            payout: Some(10.0),
            profit: Some(7.0),
            title: None,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["datePurchased"], "2024-01-09");
        assert_eq!(json["sold"], "2024-05-20");
        assert!(json.get("title").is_none());
    }

    #[test]
    fn profit_treats_missing_operands_as_zero() {
        assert_eq!(calculate_profit(Some(4.0), Some(10.5)), 6.5);
        assert_eq!(calculate_profit(Some(4.0), None), -4.0);
        assert_eq!(calculate_profit(None, None), 0.0);
    }

    #[test]
    fn recompute_profit_overwrites_stale_value() {
        let mut book: Book =
            serde_json::from_str(r#"{"id":"b","isbn":"x","cogs":2.0,"payout":9.0,"profit":100.0}"#)
                .unwrap();
        book.recompute_profit();
        assert_eq!(book.profit, Some(7.0));
    }

    #[test]
    fn isbn_must_be_thirteen_characters() {
        assert!(validate_isbn("9780000000013").is_ok());
        assert!(matches!(validate_isbn("978000000001"), Err(ApiError::Validation(_))));
        assert!(matches!(validate_isbn(""), Err(ApiError::Validation(_))));
    }

    #[test]
    fn details_keep_unknown_fields() {
        let details: BookDetails =
            serde_json::from_str(r#"{"title":"Dune","imageUrl":null,"publisher":"Ace"}"#).unwrap();
        assert_eq!(details.title.as_deref(), Some("Dune"));
        assert!(details.image_url.is_none());
        assert_eq!(details.extra["publisher"], "Ace");
    }

    #[test]
    fn new_todo_omits_missing_description() {
        let todo = NewTodo {
            title: "Ship orders".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("description").is_none());
    }
}
