//! Stateless request builder and response parser for the todo endpoint.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Building a request and parsing its
//! response are separate steps so the I/O in between stays with the caller
//! and everything here is deterministic.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::TodoItem;

/// Builds `HttpRequest` values and parses `HttpResponse` values for the
/// todo API without touching the network.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn todo_url(&self, id: i64) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        build_request(&self.todo_url(id))
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        parse_todo(response)
    }
}

/// Build a `GET` for an arbitrary todo URL.
pub fn build_request(url: &str) -> HttpRequest {
    HttpRequest {
        url: url.to_string(),
        headers: vec![("accept".to_string(), "application/json".to_string())],
    }
}

/// Interpret a response as a single `TodoItem`.
pub fn parse_todo(response: HttpResponse) -> Result<TodoItem, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decoding(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
