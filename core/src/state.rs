//! Observable state published by [`crate::FetchTodoUseCase`].

use crate::error::ErrorKind;
use crate::types::TodoItem;

/// Terminal result of the most recent completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(TodoItem),
    Failed { kind: ErrorKind, message: String },
}

/// Snapshot of the loading flag and last outcome.
///
/// The previous outcome stays in place while a new fetch is loading, so an
/// observer can keep showing stale data next to a spinner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    pub is_loading: bool,
    pub outcome: Option<FetchOutcome>,
}

impl FetchState {
    pub fn todo(&self) -> Option<&TodoItem> {
        match &self.outcome {
            Some(FetchOutcome::Loaded(todo)) => Some(todo),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(FetchOutcome::Failed { message, .. }) => Some(message),
            _ => None,
        }
    }
}
