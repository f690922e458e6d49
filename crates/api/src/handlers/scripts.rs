//! Handlers for the `/scripts` resource: dashboard listing, single-script
//! fetch, and direct partial updates.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use scriptflow_core::error::CoreError;
use scriptflow_core::script::{self, Platform, ScriptStatus};
use scriptflow_core::types::ScriptId;
use scriptflow_db::models::script::{Script, UpdateScriptFields};
use scriptflow_db::repositories::ScriptRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A dashboard row: the script plus derived badge labels and the
/// estimated narration length of the working copy.
#[derive(Debug, Serialize)]
pub struct ScriptListItem {
    #[serde(flatten)]
    pub script: Script,
    /// Source platform badge (`小红书` / `抖音`), when recognised.
    pub platform_label: Option<&'static str>,
    /// Workflow status badge.
    pub status_label: Option<&'static str>,
    /// Estimated narration length of the working copy, `MM:SS`.
    pub estimated_duration: String,
}

impl From<Script> for ScriptListItem {
    fn from(script: Script) -> Self {
        let platform_label = Platform::detect(script.source_url.as_deref()).map(Platform::label);
        let status_label = ScriptStatus::from_name(&script.status)
            .ok()
            .map(ScriptStatus::label);
        let content =
            script::display_content(script.content_cn_final.as_deref(), &script.content_cn_draft);
        let estimated_duration = script::format_duration(script::estimated_seconds(content));

        Self {
            script,
            platform_label,
            status_label,
            estimated_duration,
        }
    }
}

/// GET /api/v1/scripts
///
/// Dashboard listing, newest first. A failed store read degrades to an
/// empty list with a logged error; the dashboard always renders.
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<ScriptListItem>>> {
    let scripts = match ScriptRepo::list_all(&state.pool).await {
        Ok(scripts) => scripts,
        Err(err) => {
            tracing::error!(error = %err, "Failed to list scripts, serving empty dashboard");
            Vec::new()
        }
    };

    let data = scripts.into_iter().map(ScriptListItem::from).collect();
    Json(DataResponse { data })
}

/// GET /api/v1/scripts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<ScriptId>,
) -> AppResult<Json<Script>> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }))?;
    Ok(Json(script))
}

/// PATCH /api/v1/scripts/{id}
///
/// Direct partial update outside the autosave lanes (e.g. status
/// changes). Only supplied fields change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ScriptId>,
    Json(input): Json<UpdateScriptFields>,
) -> AppResult<Json<Script>> {
    let found = ScriptRepo::update_fields(&state.pool, id, &input).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }));
    }

    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }))?;
    Ok(Json(script))
}
