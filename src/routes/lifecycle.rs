use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::lifecycle_dto::{
        BulkTransitionPayload, BulkTransitionResponse, HistoryEntryResponse, NotesPayload,
        NotesResponse, TransitionPayload, TransitionResponse,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/lifecycle/transition",
    request_body = TransitionPayload,
    responses(
        (status = 200, description = "Transition committed", body = Json<TransitionResponse>),
        (status = 403, description = "Actor role not allowed for this action"),
        (status = 404, description = "Unknown record id"),
        (status = 409, description = "Concurrent modification, retry exhausted"),
        (status = 422, description = "Action not legal in the current state")
    )
)]
#[axum::debug_handler]
pub async fn transition(
    State(state): State<AppState>,
    Json(payload): Json<TransitionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let outcome = state
        .lifecycle_service
        .transition(
            payload.record_id,
            payload.action,
            payload.actor_id,
            payload.actor_role,
            payload.reason.as_deref(),
        )
        .await?;
    Ok(Json(TransitionResponse::from(outcome)))
}

#[utoipa::path(
    post,
    path = "/api/lifecycle/bulk-transition",
    request_body = BulkTransitionPayload,
    responses(
        (status = 200, description = "Per-record outcomes", body = Json<BulkTransitionResponse>),
        (status = 400, description = "Empty id set")
    )
)]
#[axum::debug_handler]
pub async fn bulk_transition(
    State(state): State<AppState>,
    Json(payload): Json<BulkTransitionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let results = state
        .bulk_service
        .bulk_transition(
            payload.record_ids,
            payload.action,
            payload.actor_id,
            payload.actor_role,
            payload.reason,
        )
        .await;
    Ok(Json(BulkTransitionResponse { results }))
}

#[utoipa::path(
    post,
    path = "/api/lifecycle/notes",
    request_body = NotesPayload,
    responses(
        (status = 200, description = "Notes updated", body = Json<NotesResponse>),
        (status = 404, description = "Unknown record id"),
        (status = 409, description = "Concurrent modification, retry exhausted")
    )
)]
#[axum::debug_handler]
pub async fn update_notes(
    State(state): State<AppState>,
    Json(payload): Json<NotesPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let version = state
        .lifecycle_service
        .update_notes(payload.record_id, payload.actor_id, payload.notes)
        .await?;
    Ok(Json(NotesResponse {
        status: "ok",
        version,
    }))
}

#[utoipa::path(
    get,
    path = "/api/lifecycle/history/{record_id}",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Audit trail, oldest first", body = Vec<HistoryEntryResponse>),
        (status = 404, description = "Unknown record id")
    )
)]
#[axum::debug_handler]
pub async fn get_history(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let entries = state.lifecycle_service.get_history(record_id).await?;
    let items: Vec<HistoryEntryResponse> = entries.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, Json(items)))
}
