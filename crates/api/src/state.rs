use std::sync::Arc;

use scriptflow_audio::Narrator;
use scriptflow_core::prefs::PreferenceStore;
use scriptflow_gemini::GeminiClient;

use crate::autosave::EditorSessions;
use crate::config::ServerConfig;
use crate::guard::ActionGuards;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scriptflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Retrying text-generation client.
    pub gemini: Arc<GeminiClient>,
    /// Narration pipeline (TTS + storage upload).
    pub narrator: Arc<Narrator>,
    /// Open editor sessions with their debounce lanes.
    pub sessions: Arc<EditorSessions>,
    /// Per-script in-flight action flags.
    pub guards: ActionGuards,
    /// File-backed preference blob store.
    pub prefs: Arc<PreferenceStore>,
}
