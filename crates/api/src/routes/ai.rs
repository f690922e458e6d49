//! Route definitions for the script-independent AI surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::actions;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// GET  /models     model catalog for the settings picker
/// POST /generate   raw prompt passthrough
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/models", get(actions::models))
        .route("/generate", post(actions::generate))
}
