//! Error types for the inventory API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because several endpoints use 404 as a
//! regular answer ("no book with that ISBN"). Every other non-2xx response
//! lands in `Http` with the raw status and body. `Validation` covers input the
//! core rejects before any request is built.

use thiserror::Error;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The host could not complete the round-trip (connection refused, DNS,
    /// timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("malformed response body: {0}")]
    Parse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The input was rejected locally and never sent.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ApiError::Transport(err.to_string())
    }
}
