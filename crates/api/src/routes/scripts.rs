//! Route definitions for the `/scripts` resource and its sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{actions, audio, editor, scripts};
use crate::state::AppState;

/// Routes mounted at `/scripts`.
///
/// ```text
/// GET    /                      list (dashboard)
/// GET    /{id}                  get_by_id
/// PATCH  /{id}                  update
///
/// POST   /{id}/editor           feed autosave lanes
/// DELETE /{id}/editor           close session
/// GET    /{id}/editor/status    save indicator
///
/// POST   /{id}/actions          run AI action
/// POST   /{id}/audio            generate narration
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scripts::list))
        .route("/{id}", get(scripts::get_by_id).patch(scripts::update))
        .route("/{id}/editor", post(editor::feed).delete(editor::close))
        .route("/{id}/editor/status", get(editor::status))
        .route("/{id}/actions", post(actions::run))
        .route("/{id}/audio", post(audio::generate))
}
