//! Domain types for the todo endpoint.
//!
//! # Design
//! `TodoItem` mirrors the public test API's wire shape. Field names are
//! camelCase on the wire; every field is required so that a partial body is
//! rejected at decode time rather than surfacing as a default value.

use serde::{Deserialize, Serialize};

/// A single todo record as served by `GET /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub completed: bool,
}
