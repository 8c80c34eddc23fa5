use axum::extract::Extension;
use axum::routing::get;
use axum::{Json, Router};

use crate::model::Identity;

/// Build the auth API router. The binary nests it under `/auth` and
/// layers the gate over it, so handlers here can rely on the identity
/// extension being present.
pub fn routes() -> Router {
    Router::new().route("/session", get(current_session))
}

/// GET /auth/session — the caller's validated identity.
async fn current_session(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}
