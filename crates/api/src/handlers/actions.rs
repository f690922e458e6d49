//! Handlers for the AI text actions and the raw generation passthrough.
//!
//! Action results are returned to the editor, not persisted; edited text
//! reaches the database through the autosave lanes like any other edit.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use scriptflow_core::error::CoreError;
use scriptflow_core::script::{self, parse_hook_options};
use scriptflow_core::types::ScriptId;
use scriptflow_core::prompts;
use scriptflow_db::repositories::ScriptRepo;

use crate::error::{AppError, AppResult};
use crate::guard::ActionLane;
use crate::response::DataResponse;
use crate::state::AppState;

/// The four editor AI actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    FixCta,
    RewriteHook,
    Shorten,
    Translate,
}

/// Body of `POST /scripts/{id}/actions`.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: ActionKind,
    /// Model override; `None` uses the configured default.
    pub model: Option<String>,
}

/// Action result, shaped per action kind.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ActionResult {
    /// Rewritten working copy (fix-CTA, shorten).
    Content { content: String },
    /// Up to three hook options (rewrite-hook).
    Hooks { hooks: Vec<String> },
    /// English translation (translate).
    Translation { translation: String },
}

/// POST /api/v1/scripts/{id}/actions
///
/// Run one AI action over the script's working copy. At most one text
/// action per script runs at a time; a second request conflicts.
pub async fn run(
    State(state): State<AppState>,
    Path(id): Path<ScriptId>,
    Json(request): Json<ActionRequest>,
) -> AppResult<Json<DataResponse<ActionResult>>> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }))?;

    let content =
        script::display_content(script.content_cn_final.as_deref(), &script.content_cn_draft);
    if content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Script has no content to run an AI action on".to_string(),
        ));
    }

    // Held until the response is built; a second text action meanwhile
    // gets a 409.
    let _guard = state.guards.acquire(id, ActionLane::Text)?;

    let model = request.model.as_deref();
    tracing::info!(%id, action = ?request.action, "Running AI action");

    let result = match request.action {
        ActionKind::FixCta => {
            let content = state
                .gemini
                .generate_content(&prompts::fix_cta(content), model)
                .await?;
            ActionResult::Content { content }
        }
        ActionKind::Shorten => {
            let content = state
                .gemini
                .generate_content(&prompts::shorten(content), model)
                .await?;
            ActionResult::Content { content }
        }
        ActionKind::RewriteHook => {
            let text = state
                .gemini
                .generate_content(&prompts::rewrite_hook(content), model)
                .await?;
            ActionResult::Hooks {
                hooks: parse_hook_options(&text),
            }
        }
        ActionKind::Translate => {
            let translation = state.gemini.generate_translation(content, model).await?;
            ActionResult::Translation { translation }
        }
    };

    Ok(Json(DataResponse { data: result }))
}

/// Body of `POST /ai/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub model: Option<String>,
}

/// Raw generation result.
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub content: String,
}

/// GET /api/v1/ai/models
///
/// The model catalog offered in the settings model picker.
pub async fn models() -> Json<DataResponse<&'static [scriptflow_gemini::models::GeminiModel]>> {
    Json(DataResponse {
        data: scriptflow_gemini::models::GEMINI_MODELS,
    })
}

/// POST /api/v1/ai/generate
///
/// Raw prompt passthrough to the generation client, used to verify model
/// and credential configuration.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> AppResult<Json<DataResponse<GenerateResult>>> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Prompt must not be empty".to_string()));
    }

    let content = state
        .gemini
        .generate_content(&request.prompt, request.model.as_deref())
        .await?;
    Ok(Json(DataResponse {
        data: GenerateResult { content },
    }))
}
