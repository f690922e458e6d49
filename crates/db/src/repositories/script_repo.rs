//! Repository for the `scripts` table.

use sqlx::PgPool;

use scriptflow_core::types::ScriptId;

use crate::models::script::{Script, UpdateScriptFields};

/// Column list for `scripts` SELECT queries.
const COLUMNS: &str = "\
    id, created_at, source_url, raw_text, title, \
    content_cn_draft, content_cn_final, content_en, \
    audio_url, status, tags";

/// Read and partial-write operations for script records.
///
/// Creation and deletion happen outside this system (scripts are
/// ingested by an external collector), so there is deliberately no
/// `create` or `delete` here.
pub struct ScriptRepo;

impl ScriptRepo {
    /// List all scripts, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts ORDER BY created_at DESC");
        sqlx::query_as::<_, Script>(&query).fetch_all(pool).await
    }

    /// Find a script by its ID.
    pub async fn find_by_id(pool: &PgPool, id: ScriptId) -> Result<Option<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts WHERE id = $1");
        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields in the DTO change;
    /// `id`, `created_at`, `raw_text`, and `content_cn_draft` are never
    /// touched. Returns `false` when no row matched.
    pub async fn update_fields(
        pool: &PgPool,
        id: ScriptId,
        dto: &UpdateScriptFields,
    ) -> Result<bool, sqlx::Error> {
        let query = "\
            UPDATE scripts SET \
                title = COALESCE($2, title), \
                content_cn_final = COALESCE($3, content_cn_final), \
                content_en = COALESCE($4, content_en), \
                status = COALESCE($5, status) \
            WHERE id = $1";

        let rows_affected = sqlx::query(query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.content_cn_final)
            .bind(&dto.content_en)
            .bind(dto.status.map(|s| s.name()))
            .execute(pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Record the narration URL for a script. Only sets the URL when none
    /// is present yet; returns `false` if the row was missing or already
    /// narrated.
    pub async fn set_audio_url(
        pool: &PgPool,
        id: ScriptId,
        audio_url: &str,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected =
            sqlx::query("UPDATE scripts SET audio_url = $2 WHERE id = $1 AND audio_url IS NULL")
                .bind(id)
                .bind(audio_url)
                .execute(pool)
                .await?
                .rows_affected();

        Ok(rows_affected > 0)
    }
}
