use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use auth::model::Identity;
use huddle_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::EventInput;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_events).post(create_event))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

/// GET /events — the caller's own events.
async fn list_my_events(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc
        .list_my_events(identity.user_id(), &params)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

/// POST /events — create an event with the caller as creator.
async fn create_event(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let event = svc
        .create_event(&identity, input)
        .map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(event).unwrap_or_default()),
    ))
}

/// GET /events/{id} — one event with its participants.
async fn get_event(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let detail = svc.get_event(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(detail).unwrap_or_default()))
}

/// PUT /events/{id} — full-replace update, creator only.
async fn update_event(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(input): Json<EventInput>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let event = svc
        .update_event(identity.user_id(), &id, input)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(event).unwrap_or_default()))
}

/// DELETE /events/{id} — creator only.
async fn delete_event(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_event(identity.user_id(), &id)
        .map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
