//! Route tree assembly.

pub mod ai;
pub mod health;
pub mod scripts;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /scripts                          dashboard listing
/// /scripts/{id}                     get, partial update
/// /scripts/{id}/editor              feed autosave lanes, teardown
/// /scripts/{id}/editor/status       save indicator
/// /scripts/{id}/actions             AI text actions
/// /scripts/{id}/audio               narration
///
/// /ai/models                        model catalog
/// /ai/generate                      raw generation passthrough
///
/// /settings                         preference blob get, replace
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/scripts", scripts::router())
        .nest("/ai", ai::router())
        .nest("/settings", settings::router())
}
