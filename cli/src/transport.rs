//! Blocking executor for the requests the core hands out.

use std::time::Duration;

use inventory_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Outgoing};

pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    /// Status codes come back as data; the core decides what a 404 means.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let agent = &self.agent;
        let mut response = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        }
        .map_err(ApiError::transport)?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(ApiError::transport)?;
        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse::new(status, body))
    }

    /// Execute and pair the result with its ticket, ready for `complete`.
    pub fn run<T>(&self, out: Outgoing<T>) -> (T, Result<HttpResponse, ApiError>) {
        let result = self.execute(out.request);
        (out.ticket, result)
    }
}
