//! Route registration — collects all module routes + system endpoints,
//! then layers the auth gate over the whole application.

use std::sync::Arc;

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use auth::gate::{require_identity, AuthGate};

/// Build the complete router.
///
/// Module routes are already `Router<()>` (they called `.with_state()`
/// internally) and are nested under `/{module_name}`. The gate runs on
/// every request; its public-prefix list decides what passes through
/// unauthenticated.
pub fn build_router(module_routes: Vec<(&str, Router)>, gate: Arc<AuthGate>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for (name, router) in module_routes {
        app = app.nest(&format!("/{}", name), router);
    }

    app.layer(middleware::from_fn_with_state(gate, require_identity))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "huddled",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
