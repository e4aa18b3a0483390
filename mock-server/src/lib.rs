use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    pub user_id: Option<i64>,
}

pub type Db = Arc<BTreeMap<i64, Todo>>;

/// First records of the public test API.
pub fn fixtures() -> Vec<Todo> {
    [
        (1, "delectus aut autem", false),
        (2, "quis ut nam facilis et officia qui", false),
        (3, "fugiat veniam minus", false),
        (4, "et porro tempora", true),
        (5, "laboriosam mollitia et enim quasi adipisci quia provident illum", false),
    ]
    .into_iter()
    .map(|(id, title, completed)| Todo {
        user_id: 1,
        id,
        title: title.to_string(),
        completed,
    })
    .collect()
}

pub fn app() -> Router {
    app_with(fixtures())
}

pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(todos.into_iter().map(|t| (t.id, t)).collect());
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/{id}", get(get_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>, Query(filter): Query<ListFilter>) -> Json<Vec<Todo>> {
    let todos = db
        .values()
        .filter(|t| filter.user_id.map_or(true, |user_id| t.user_id == user_id))
        .cloned()
        .collect();
    Json(todos)
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    tracing::debug!(id, "get todo");
    db.get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(json!({}))))
}
