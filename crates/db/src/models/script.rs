//! Script entity model and DTOs.
//!
//! Models for the `scripts` table: the source material captured at
//! ingest plus the editable working copy, translation, and narration URL.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use scriptflow_core::script::ScriptStatus;
use scriptflow_core::types::{ScriptId, Timestamp};

/// A script record.
///
/// `id` and `created_at` never change after insert. `content_cn_draft`
/// is the immutable original draft; the editor writes only to
/// `content_cn_final`, `content_en`, and `title`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Script {
    pub id: ScriptId,
    pub created_at: Timestamp,
    pub source_url: Option<String>,
    /// Immutable source material, read-only in the editor.
    pub raw_text: String,
    pub title: String,
    pub content_cn_draft: String,
    /// Working copy; `None` until the first edit.
    pub content_cn_final: Option<String>,
    pub content_en: Option<String>,
    /// Set once narration has been generated; never overwritten.
    pub audio_url: Option<String>,
    pub status: String,
    pub tags: Vec<String>,
}

/// DTO for partial updates. Only non-`None` fields are applied; a field
/// can therefore never be cleared through this path, which is what the
/// autosave lanes rely on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScriptFields {
    pub title: Option<String>,
    pub content_cn_final: Option<String>,
    pub content_en: Option<String>,
    pub status: Option<ScriptStatus>,
}
