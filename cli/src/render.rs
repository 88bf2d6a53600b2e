//! Plain-text rendering of dashboard data.

use std::fmt::Write;

use chrono::NaiveDate;
use inventory_core::{Book, BookDetails, Dashboard, Todo};

fn date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_default()
}

fn money(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_default()
}

pub fn books(books: &[Book]) -> String {
    let mut out = format!(
        "{:<13}  {:<10}  {:>8}  {:>8}  {:<10}  {:>8}  {}\n",
        "ISBN", "PURCHASED", "COGS", "PAYOUT", "SOLD", "PROFIT", "ID"
    );
    for b in books {
        let _ = writeln!(
            out,
            "{:<13}  {:<10}  {:>8}  {:>8}  {:<10}  {:>8}  {}",
            b.isbn,
            date(b.date_purchased),
            money(b.cogs),
            money(b.payout),
            date(b.sold),
            money(b.profit),
            b.id
        );
    }
    let _ = write!(out, "{} book(s)", books.len());
    out
}

pub fn details(isbn: &str, details: &BookDetails) -> String {
    format!(
        "ISBN:  {isbn}\nTitle: {}\nImage: {}",
        details.title.as_deref().unwrap_or("(unknown)"),
        details.image_url.as_deref().unwrap_or("No image available."),
    )
}

pub fn summary(dashboard: &Dashboard) -> String {
    let status = dashboard.inventory_status();
    let finance = dashboard.financial_overview();
    format!(
        "Inventory status:   sold {} | unsold {}\n\
         Total inventory:    {} / {} ({:.0}%)\n\
         Financial overview: COGS ${:.2} | Profit ${:.2}",
        status.sold,
        status.unsold,
        dashboard.active_inventory(),
        inventory_core::summary::INVENTORY_CAPACITY,
        dashboard.inventory_usage_percent(),
        finance.cogs,
        finance.profit,
    )
}

pub fn todos(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "nothing to do".to_string();
    }
    todos
        .iter()
        .map(|t| {
            let mark = if t.completed.unwrap_or(false) { "x" } else { " " };
            format!("[{mark}] {}  ({})", t.title, t.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
