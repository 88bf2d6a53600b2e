//! Requests handed to the host and what became of their responses.

use crate::error::ApiError;
use crate::http::HttpRequest;

/// A request the host must execute. The `ticket` goes back, unchanged, into
/// the owning component's `complete` together with the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing<T> {
    pub ticket: T,
    pub request: HttpRequest,
}

impl<T> Outgoing<T> {
    pub fn new(ticket: T, request: HttpRequest) -> Self {
        Self { ticket, request }
    }
}

/// Result of feeding a completion back into a component.
///
/// Failures are already logged and the component's state already settled
/// when `Failed` is returned; callers only need it to tell a failed request
/// apart from a legitimately empty answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    /// Superseded by a later request, or the component was unmounted.
    Discarded,
    Failed(ApiError),
}
