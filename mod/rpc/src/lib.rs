//! RPC demo module — small public endpoints that sit outside the auth
//! gate: a random joke and an in-memory todo list.

pub mod jokes;
pub mod todos;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use huddle_core::Module;

use crate::todos::TodoStore;

/// Shared module state.
pub struct RpcState {
    pub todos: TodoStore,
}

pub type AppState = Arc<RpcState>;

/// RPC module implementing the Module trait.
pub struct RpcModule {
    state: AppState,
}

impl RpcModule {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RpcState {
                todos: TodoStore::default(),
            }),
        }
    }
}

impl Default for RpcModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for RpcModule {
    fn name(&self) -> &str {
        "rpc"
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/joke", get(jokes::random_joke))
            .merge(todos::routes())
            .with_state(self.state.clone())
    }
}
