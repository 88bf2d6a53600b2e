//! ISBN-keyed cache of book detail payloads.
//!
//! # Design
//! Entries live in a [`SessionStore`] under `bookDetails-{isbn}` as serialized
//! JSON, so a browser shell can hand in its `sessionStorage`. Lookups for an
//! ISBN whose fetch is still outstanding join that fetch instead of issuing a
//! second one; `resolve` reports how many lookups were waiting on it.

use std::collections::HashMap;

use crate::client::InventoryClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::session::SessionStore;
use crate::types::BookDetails;

const KEY_PREFIX: &str = "bookDetails-";

pub fn cache_key(isbn: &str) -> String {
    format!("{KEY_PREFIX}{isbn}")
}

/// Result of [`DetailsCache::lookup`].
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsLookup {
    /// Served from the store, no network involved.
    Hit(BookDetails),
    /// Nothing cached and nothing in flight: the caller must execute this
    /// request and hand the result to [`DetailsCache::resolve`].
    Fetch(HttpRequest),
    /// A fetch for this ISBN is already outstanding.
    Joined,
}

/// Outcome of one completed detail fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub result: Result<BookDetails, ApiError>,
    /// Lookups served by this fetch, the one that issued it included.
    pub waiters: usize,
}

#[derive(Debug)]
pub struct DetailsCache<S> {
    client: InventoryClient,
    store: S,
    in_flight: HashMap<String, usize>,
}

impl<S: SessionStore> DetailsCache<S> {
    pub fn new(client: InventoryClient, store: S) -> Self {
        Self {
            client,
            store,
            in_flight: HashMap::new(),
        }
    }

    pub fn lookup(&mut self, isbn: &str) -> DetailsLookup {
        if let Some(details) = self.cached(isbn) {
            return DetailsLookup::Hit(details);
        }
        if let Some(waiters) = self.in_flight.get_mut(isbn) {
            *waiters += 1;
            tracing::debug!(isbn, waiters = *waiters, "joining in-flight details fetch");
            return DetailsLookup::Joined;
        }
        self.in_flight.insert(isbn.to_string(), 1);
        DetailsLookup::Fetch(self.client.build_book_details(isbn))
    }

    /// Complete the outstanding fetch for `isbn`. Only successful payloads
    /// are stored.
    pub fn resolve(
        &mut self,
        isbn: &str,
        response: Result<HttpResponse, ApiError>,
    ) -> Resolved {
        let waiters = self.in_flight.remove(isbn).unwrap_or(0);
        let result = response.and_then(|r| self.client.parse_book_details(r));
        match &result {
            Ok(details) => match serde_json::to_string(details) {
                Ok(raw) => self.store.set(&cache_key(isbn), raw),
                Err(err) => tracing::warn!(isbn, error = %err, "could not cache book details"),
            },
            Err(err) => tracing::error!(isbn, error = %err, "error fetching book details"),
        }
        Resolved { result, waiters }
    }

    pub fn is_in_flight(&self, isbn: &str) -> bool {
        self.in_flight.contains_key(isbn)
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.store.get(&cache_key(isbn)).is_some()
    }

    pub fn invalidate(&mut self, isbn: &str) {
        self.store.remove(&cache_key(isbn));
    }

    /// End the session: drop every stored entry.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn cached(&mut self, isbn: &str) -> Option<BookDetails> {
        let key = cache_key(isbn);
        let raw = self.store.get(&key)?;
        match serde_json::from_str(&raw) {
            Ok(details) => Some(details),
            Err(err) => {
                tracing::warn!(isbn, error = %err, "dropping corrupt cached details");
                self.store.remove(&key);
                None
            }
        }
    }
}
