//! Handlers for the persisted preference blob.
//!
//! Loaded once when the editor mounts, written only on an explicit save
//! action; there is no autosave on this surface.

use axum::extract::State;
use axum::Json;

use scriptflow_core::prefs::Preferences;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get(State(state): State<AppState>) -> AppResult<Json<DataResponse<Preferences>>> {
    let prefs = state.prefs.load().await?;
    Ok(Json(DataResponse { data: prefs }))
}

/// PUT /api/v1/settings
///
/// Replace the preference blob with the supplied one.
pub async fn put(
    State(state): State<AppState>,
    Json(prefs): Json<Preferences>,
) -> AppResult<Json<DataResponse<Preferences>>> {
    state.prefs.save(&prefs).await?;
    Ok(Json(DataResponse { data: prefs }))
}
