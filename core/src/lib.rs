//! Fetch a single todo record and publish the outcome to observers.
//!
//! # Overview
//! [`FetchTodoUseCase`] issues one `GET` per invocation, decodes the
//! four-field todo body, and publishes a [`FetchState`] (loading flag plus
//! last outcome) through a `tokio::sync::watch` channel.
//!
//! # Design
//! - Request building and response parsing live in [`client`] and never
//!   touch the network (host-does-IO split).
//! - [`Transport`] is the only I/O seam; [`ReqwestTransport`] is the
//!   production implementation and tests substitute their own.
//! - Failures collapse into two observer-facing kinds, network and
//!   decoding; see [`ErrorKind`].

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod http;
pub mod state;
pub mod transport;
pub mod types;
pub mod use_case;

pub use client::TodoClient;
pub use config::{ConfigError, FetchConfig};
pub use error::{ApiError, ErrorKind};
pub use http::{HttpRequest, HttpResponse};
pub use state::{FetchOutcome, FetchState};
pub use transport::{ReqwestTransport, Transport, TransportConfig};
pub use types::TodoItem;
pub use use_case::FetchTodoUseCase;
