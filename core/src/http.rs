//! HTTP transport types for the host-does-IO split.
//!
//! # Design
//! Requests and responses are plain data. [`crate::client`] builds
//! `HttpRequest` values and parses `HttpResponse` values without touching
//! the network; a [`crate::transport::Transport`] performs the actual I/O.
//! Only `GET` is ever issued, so the request carries no method.

/// An outbound `GET` described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// A received response described as plain data.
///
/// Non-2xx statuses are represented here rather than as transport errors;
/// interpreting the status is the parser's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Response headers with lowercase names. The parser ignores them; they
    /// are kept for callers driving a `Transport` directly.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
