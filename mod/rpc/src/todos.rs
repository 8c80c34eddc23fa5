use std::sync::Mutex;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router};
use axum::routing::get;
use serde::{Deserialize, Serialize};

use huddle_core::{new_id, ServiceError};

use crate::AppState;

/// A demo todo item. In-memory only; gone on restart.
#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub done: bool,
}

/// Input for adding a todo.
#[derive(Debug, Deserialize)]
pub struct AddTodo {
    pub text: String,
}

/// Mutex-guarded todo list. The lock is held only for the duration of a
/// single list or push, never across an await.
#[derive(Default)]
pub struct TodoStore {
    items: Mutex<Vec<Todo>>,
}

impl TodoStore {
    pub fn list(&self) -> Vec<Todo> {
        self.items.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn add(&self, text: &str) -> Result<Todo, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation("text is required".into()));
        }
        let todo = Todo {
            id: new_id(),
            text: text.to_string(),
            done: false,
        };
        if let Ok(mut items) = self.items.lock() {
            items.push(todo.clone());
        }
        Ok(todo)
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/todos", get(list_todos).post(add_todo))
}

/// GET /rpc/todos
async fn list_todos(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "items": state.todos.list() }))
}

/// POST /rpc/todos
async fn add_todo(
    State(state): State<AppState>,
    Json(input): Json<AddTodo>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let todo = state.todos.add(&input.text)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(todo).unwrap_or_default()),
    ))
}
