//! Text renderings of a todo and of the fetch state.

use crate::state::{FetchOutcome, FetchState};
use crate::types::TodoItem;

pub const LOADING_TEXT: &str = "Loading data...";
pub const EMPTY_TEXT: &str = "No data";

pub fn status_label(completed: bool) -> &'static str {
    if completed {
        "Completed"
    } else {
        "Pending"
    }
}

/// Full listing of all four fields after a successful fetch.
pub fn detail_text(todo: &TodoItem) -> String {
    format!(
        "Success!\n\nUserID: {}\nID: {}\nTitle: {}\nCompleted: {}",
        todo.user_id, todo.id, todo.title, todo.completed
    )
}

/// Compact three-line summary.
pub fn card_text(todo: &TodoItem) -> String {
    format!(
        "{}\nStatus: {}\nUser ID: {}",
        todo.title,
        status_label(todo.completed),
        todo.user_id
    )
}

pub fn error_text(message: &str) -> String {
    format!("Error: {message}")
}

/// What an observer shows for `state`. Loading takes precedence over any
/// stale outcome.
pub fn render(state: &FetchState) -> String {
    if state.is_loading {
        return LOADING_TEXT.to_string();
    }
    match &state.outcome {
        None => EMPTY_TEXT.to_string(),
        Some(FetchOutcome::Loaded(todo)) => detail_text(todo),
        Some(FetchOutcome::Failed { message, .. }) => error_text(message),
    }
}
