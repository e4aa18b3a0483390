//! Error types for fetching a todo.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the test API answers unknown
//! ids with 404 and an empty object. Every other non-2xx response lands in
//! `Status` with the raw code and body. Observers only care about the two
//! coarse kinds exposed by [`ApiError::kind`].

use thiserror::Error;

/// Errors produced while executing or interpreting a todo request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, or the body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body did not match the four-field todo shape.
    #[error("decoding failed: {0}")]
    Decoding(String),
}

/// Coarse classification reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decoding,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) | ApiError::NotFound | ApiError::Status { .. } => {
                ErrorKind::Network
            }
            ApiError::Decoding(_) => ErrorKind::Decoding,
        }
    }
}
