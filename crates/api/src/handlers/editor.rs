//! Handlers for the editor autosave surface.
//!
//! The editor feeds field changes here as the user types; the session's
//! debounce lanes decide when the database is actually written.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use scriptflow_core::error::CoreError;
use scriptflow_core::types::ScriptId;
use scriptflow_db::repositories::ScriptRepo;

use crate::autosave::{EditorUpdate, SaveStatus, SessionSeed};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Save-indicator payload.
#[derive(Debug, Serialize)]
pub struct SaveStatusBody {
    pub status: SaveStatus,
}

/// POST /api/v1/scripts/{id}/editor
///
/// Feed a batch of field changes into the script's debounce lanes,
/// opening a session seeded from the current row if none exists yet.
/// Returns the save status after the feed; the actual write happens once
/// the lane settles.
pub async fn feed(
    State(state): State<AppState>,
    Path(id): Path<ScriptId>,
    Json(update): Json<EditorUpdate>,
) -> AppResult<Json<DataResponse<SaveStatusBody>>> {
    if !state.sessions.is_open(id).await {
        let script = ScriptRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Script",
                id,
            }))?;
        state
            .sessions
            .open(
                id,
                SessionSeed {
                    title: script.title,
                    content_cn_final: script.content_cn_final,
                },
            )
            .await;
    }

    let status = state
        .sessions
        .feed(id, update)
        .await
        .unwrap_or(SaveStatus::Idle);
    Ok(Json(DataResponse {
        data: SaveStatusBody { status },
    }))
}

/// GET /api/v1/scripts/{id}/editor/status
///
/// Tri-state save indicator. Scripts without an open session are idle.
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<ScriptId>,
) -> Json<DataResponse<SaveStatusBody>> {
    let status = state.sessions.status(id).await;
    Json(DataResponse {
        data: SaveStatusBody { status },
    })
}

/// DELETE /api/v1/scripts/{id}/editor
///
/// Tear the session down, cancelling pending debounce timers in both
/// lanes. A value that never settled is never written.
pub async fn close(State(state): State<AppState>, Path(id): Path<ScriptId>) -> StatusCode {
    state.sessions.close(id).await;
    StatusCode::NO_CONTENT
}
