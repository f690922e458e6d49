//! Handler for narration generation.
//!
//! Unlike autosave, every failure here is fatal to the request and
//! surfaces as a blocking JSON error naming the failed stage.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use scriptflow_core::error::CoreError;
use scriptflow_core::script;
use scriptflow_core::types::ScriptId;
use scriptflow_db::repositories::ScriptRepo;

use crate::error::{AppError, AppResult};
use crate::guard::ActionLane;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AudioBody {
    pub audio_url: String,
}

/// POST /api/v1/scripts/{id}/audio
///
/// Narrate the script's working copy: synthesize speech, upload the
/// audio, and record the public URL on the row. A script narrates at
/// most once; a second request (or one racing a narration in flight)
/// conflicts. Narration may run while a text action is in flight.
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<ScriptId>,
) -> AppResult<(StatusCode, Json<DataResponse<AudioBody>>)> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }))?;

    if script.audio_url.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Narration already exists for this script".to_string(),
        )));
    }

    let content =
        script::display_content(script.content_cn_final.as_deref(), &script.content_cn_draft);
    if content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Script has no content to narrate".to_string(),
        ));
    }

    let _guard = state.guards.acquire(id, ActionLane::Audio)?;

    let audio_url = state.narrator.narrate(content, id).await?;

    // The column only accepts the first URL; losing this race after the
    // upload still leaves a valid (orphaned) object behind, which the
    // conflict response makes visible.
    let recorded = ScriptRepo::set_audio_url(&state.pool, id, &audio_url).await?;
    if !recorded {
        return Err(AppError::Core(CoreError::Conflict(
            "Narration already exists for this script".to_string(),
        )));
    }

    tracing::info!(%id, %audio_url, "Narration recorded");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AudioBody { audio_url },
        }),
    ))
}
