mod events;
mod participants;

use std::sync::Arc;

use axum::Router;

use crate::service::EventsService;

/// Shared application state.
pub type AppState = Arc<EventsService>;

/// Build the events API router.
///
/// All routes are relative — the caller nests them under `/events` and
/// layers the auth gate over them, so every handler here receives a
/// validated `Identity` extension.
pub fn build_router(svc: AppState) -> Router {
    Router::new()
        .merge(events::routes())
        .merge(participants::routes())
        .with_state(svc)
}
