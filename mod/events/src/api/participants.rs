use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};

use auth::model::Identity;
use huddle_core::ServiceError;

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/participants",
            get(list_participants).post(join_event),
        )
        .route("/{id}/participants/{user_id}", delete(remove_participant))
}

/// GET /events/{id}/participants
async fn list_participants(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let participants = svc.list_participants(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "items": participants })))
}

/// POST /events/{id}/participants — join as the calling user.
async fn join_event(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let participant = svc
        .join_event(&identity, &id)
        .map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(participant).unwrap_or_default()),
    ))
}

/// DELETE /events/{id}/participants/{user_id} — self or creator.
async fn remove_participant(
    State(svc): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ServiceError> {
    svc.leave_event(identity.user_id(), &id, &user_id)
        .map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
