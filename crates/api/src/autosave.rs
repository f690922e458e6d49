//! Server-side autosave coordinator for the two-pane editor.
//!
//! Each open editor holds one [`EditorSession`] with two independent
//! debounce lanes over the same settle window:
//!
//! * the primary lane carries the title and the Chinese working copy as
//!   one unit -- when it fires, both fields are written together with no
//!   diffing -- and drives the tri-state save indicator;
//! * the translation lane carries the English text and stays silent,
//!   skipping values that trim to empty.
//!
//! Autosave writes are best-effort: a failed write resets the indicator
//! and is logged, but never surfaces as an HTTP error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use scriptflow_core::debounce::DebouncedSink;
use scriptflow_core::error::CoreError;
use scriptflow_core::types::ScriptId;
use scriptflow_db::models::script::UpdateScriptFields;
use scriptflow_db::repositories::ScriptRepo;
use scriptflow_db::DbPool;

/// Settle window for both lanes.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// How long the indicator shows "saved" before reverting to idle.
pub const SAVED_DISPLAY: Duration = Duration::from_millis(2000);

/// Tri-state save indicator driven by the primary lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
}

/// Persistence seam for autosave writes, so the coordinator can be
/// exercised without a database.
#[async_trait]
pub trait ScriptWriter: Send + Sync + 'static {
    async fn write(&self, id: ScriptId, fields: UpdateScriptFields) -> Result<(), CoreError>;
}

/// Production writer over the scripts repository.
pub struct PgScriptWriter {
    pool: DbPool,
}

impl PgScriptWriter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScriptWriter for PgScriptWriter {
    async fn write(&self, id: ScriptId, fields: UpdateScriptFields) -> Result<(), CoreError> {
        let found = ScriptRepo::update_fields(&self.pool, id, &fields)
            .await
            .map_err(|err| CoreError::Internal(format!("Autosave update failed: {err}")))?;
        if !found {
            return Err(CoreError::NotFound {
                entity: "Script",
                id,
            });
        }
        Ok(())
    }
}

/// One batch of editor field changes fed into the session's lanes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorUpdate {
    pub title: Option<String>,
    pub content_cn_final: Option<String>,
    pub content_en: Option<String>,
}

/// Current values of the primary-lane fields. Seeded from the script row
/// when the session opens so a title-only edit still writes both fields.
#[derive(Debug, Clone)]
pub struct SessionSeed {
    pub title: String,
    pub content_cn_final: Option<String>,
}

#[derive(Debug, Clone)]
struct PrimaryPayload {
    title: String,
    content_cn_final: Option<String>,
}

/// Debounced autosave state for one open editor.
pub struct EditorSession {
    primary: DebouncedSink<PrimaryPayload>,
    translation: DebouncedSink<String>,
    latest: Mutex<PrimaryPayload>,
    status_rx: watch::Receiver<SaveStatus>,
}

impl EditorSession {
    fn open(
        script_id: ScriptId,
        seed: SessionSeed,
        writer: Arc<dyn ScriptWriter>,
        delay: Duration,
    ) -> Self {
        let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);
        // Monotonic save counter; the delayed revert to idle only runs
        // when no newer save has started in the meantime.
        let save_seq = Arc::new(AtomicU64::new(0));

        let primary_writer = Arc::clone(&writer);
        let primary = DebouncedSink::new(delay, move |payload: PrimaryPayload| {
            let writer = Arc::clone(&primary_writer);
            let status_tx = status_tx.clone();
            let save_seq = Arc::clone(&save_seq);
            async move {
                let seq = save_seq.fetch_add(1, Ordering::SeqCst) + 1;
                let _ = status_tx.send(SaveStatus::Saving);

                let fields = UpdateScriptFields {
                    title: Some(payload.title),
                    content_cn_final: payload.content_cn_final,
                    ..Default::default()
                };
                match writer.write(script_id, fields).await {
                    Ok(()) => {
                        let _ = status_tx.send(SaveStatus::Saved);
                        tokio::spawn(async move {
                            tokio::time::sleep(SAVED_DISPLAY).await;
                            if save_seq.load(Ordering::SeqCst) == seq {
                                let _ = status_tx.send(SaveStatus::Idle);
                            }
                        });
                    }
                    Err(err) => {
                        // Best-effort: log and reset, never surface.
                        tracing::error!(%script_id, error = %err, "Autosave write failed");
                        let _ = status_tx.send(SaveStatus::Idle);
                    }
                }
            }
        });

        let translation = DebouncedSink::new(delay, move |text: String| {
            let writer = Arc::clone(&writer);
            async move {
                // The emptiness check happens when the timer fires, not
                // at push time: an edit that is cleared before settling
                // must suppress the pending value, not leave it armed.
                if text.trim().is_empty() {
                    return;
                }
                let fields = UpdateScriptFields {
                    content_en: Some(text),
                    ..Default::default()
                };
                if let Err(err) = writer.write(script_id, fields).await {
                    tracing::error!(%script_id, error = %err, "Translation autosave failed");
                }
            }
        });

        Self {
            primary,
            translation,
            latest: Mutex::new(PrimaryPayload {
                title: seed.title,
                content_cn_final: seed.content_cn_final,
            }),
            status_rx,
        }
    }

    /// Merge a batch of field changes into the lanes.
    fn feed(&self, update: EditorUpdate) {
        if update.title.is_some() || update.content_cn_final.is_some() {
            let snapshot = {
                let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(title) = update.title {
                    latest.title = title;
                }
                if let Some(content) = update.content_cn_final {
                    latest.content_cn_final = Some(content);
                }
                latest.clone()
            };
            self.primary.push(snapshot);
        }

        if let Some(text) = update.content_en {
            self.translation.push(text);
        }
    }

    fn status(&self) -> SaveStatus {
        *self.status_rx.borrow()
    }

    async fn close(self) {
        self.primary.close().await;
        self.translation.close().await;
    }
}

/// Registry of open editor sessions, keyed by script id.
pub struct EditorSessions {
    sessions: tokio::sync::Mutex<HashMap<ScriptId, EditorSession>>,
    writer: Arc<dyn ScriptWriter>,
    delay: Duration,
}

impl EditorSessions {
    pub fn new(writer: Arc<dyn ScriptWriter>) -> Self {
        Self::with_delay(writer, AUTOSAVE_DELAY)
    }

    pub fn with_delay(writer: Arc<dyn ScriptWriter>, delay: Duration) -> Self {
        Self {
            sessions: tokio::sync::Mutex::new(HashMap::new()),
            writer,
            delay,
        }
    }

    /// Whether a session is open for the script.
    pub async fn is_open(&self, id: ScriptId) -> bool {
        self.sessions.lock().await.contains_key(&id)
    }

    /// Open a session seeded with the script's current primary-lane
    /// values. A session that is already open is left untouched.
    pub async fn open(&self, id: ScriptId, seed: SessionSeed) {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(id)
            .or_insert_with(|| EditorSession::open(id, seed, Arc::clone(&self.writer), self.delay));
    }

    /// Feed field changes into the script's session. Returns the save
    /// status after the feed, or `None` when no session is open.
    pub async fn feed(&self, id: ScriptId, update: EditorUpdate) -> Option<SaveStatus> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(&id)?;
        session.feed(update);
        Some(session.status())
    }

    /// Current save status; scripts without a session are idle.
    pub async fn status(&self, id: ScriptId) -> SaveStatus {
        match self.sessions.lock().await.get(&id) {
            Some(session) => session.status(),
            None => SaveStatus::Idle,
        }
    }

    /// Tear a session down, cancelling pending timers in both lanes.
    /// Returns whether a session existed.
    pub async fn close(&self, id: ScriptId) -> bool {
        let session = self.sessions.lock().await.remove(&id);
        match session {
            Some(session) => {
                session.close().await;
                true
            }
            None => false,
        }
    }

    /// Close every open session (server shutdown).
    pub async fn shutdown(&self) {
        let sessions: Vec<_> = self.sessions.lock().await.drain().collect();
        for (_, session) in sessions {
            session.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;

    const DELAY: Duration = AUTOSAVE_DELAY;
    const EPSILON: Duration = Duration::from_millis(50);

    /// In-memory writer recording every attempted write.
    #[derive(Default)]
    struct RecordingWriter {
        writes: Mutex<Vec<(ScriptId, UpdateScriptFields)>>,
        fail: AtomicBool,
    }

    impl RecordingWriter {
        fn writes(&self) -> Vec<(ScriptId, UpdateScriptFields)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ScriptWriter for RecordingWriter {
        async fn write(&self, id: ScriptId, fields: UpdateScriptFields) -> Result<(), CoreError> {
            self.writes.lock().unwrap().push((id, fields));
            if self.fail.load(Ordering::SeqCst) {
                return Err(CoreError::Internal("writer down".into()));
            }
            Ok(())
        }
    }

    fn seed() -> SessionSeed {
        SessionSeed {
            title: "Original title".into(),
            content_cn_final: None,
        }
    }

    async fn open_session(
        sessions: &EditorSessions,
        id: ScriptId,
    ) {
        sessions.open(id, seed()).await;
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_one_combined_write() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        // Rapid edits to both primary fields inside one window.
        for (i, text) in ["你", "你好", "你好世界"].iter().enumerate() {
            sessions
                .feed(
                    id,
                    EditorUpdate {
                        title: Some(format!("Title v{i}")),
                        content_cn_final: Some(text.to_string()),
                        content_en: None,
                    },
                )
                .await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(DELAY + EPSILON).await;

        let writes = writer.writes();
        assert_eq!(writes.len(), 1, "a burst must collapse to one write");
        let (written_id, fields) = &writes[0];
        assert_eq!(*written_id, id);
        // Both fields travel together, carrying the final values.
        assert_eq!(fields.title.as_deref(), Some("Title v2"));
        assert_eq!(fields.content_cn_final.as_deref(), Some("你好世界"));
        assert!(fields.content_en.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn title_only_edit_still_writes_both_primary_fields() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        sessions
            .open(
                id,
                SessionSeed {
                    title: "Old".into(),
                    content_cn_final: Some("已有内容".into()),
                },
            )
            .await;

        sessions
            .feed(
                id,
                EditorUpdate {
                    title: Some("New".into()),
                    ..Default::default()
                },
            )
            .await;
        tokio::time::sleep(DELAY + EPSILON).await;

        let writes = writer.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1.title.as_deref(), Some("New"));
        // The seeded working copy rides along unchanged.
        assert_eq!(writes[0].1.content_cn_final.as_deref(), Some("已有内容"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_translation_schedules_no_write() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        sessions
            .feed(
                id,
                EditorUpdate {
                    content_en: Some("   \n ".into()),
                    ..Default::default()
                },
            )
            .await;
        tokio::time::sleep(DELAY * 2).await;

        assert!(writer.writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_translation_inside_the_window_suppresses_the_write() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        // Type, then clear the pane before the lane settles; the stale
        // text must never reach the database.
        sessions
            .feed(
                id,
                EditorUpdate {
                    content_en: Some("hello".into()),
                    ..Default::default()
                },
            )
            .await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        sessions
            .feed(
                id,
                EditorUpdate {
                    content_en: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;

        tokio::time::sleep(DELAY * 2).await;
        assert!(writer.writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn translation_lane_writes_only_the_english_field() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        sessions
            .feed(
                id,
                EditorUpdate {
                    content_en: Some("Hello world".into()),
                    ..Default::default()
                },
            )
            .await;
        tokio::time::sleep(DELAY + EPSILON).await;

        let writes = writer.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1.content_en.as_deref(), Some("Hello world"));
        assert!(writes[0].1.title.is_none());
        assert!(writes[0].1.content_cn_final.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn lanes_fire_independently() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        sessions
            .feed(
                id,
                EditorUpdate {
                    title: Some("T".into()),
                    content_en: Some("EN".into()),
                    ..Default::default()
                },
            )
            .await;
        tokio::time::sleep(DELAY + EPSILON).await;

        let writes = writer.writes();
        assert_eq!(writes.len(), 2, "each lane performs its own write");
        assert!(writes.iter().any(|(_, f)| f.title.is_some() && f.content_en.is_none()));
        assert!(writes.iter().any(|(_, f)| f.content_en.is_some() && f.title.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn status_runs_idle_saving_saved_idle() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        assert_eq!(sessions.status(id).await, SaveStatus::Idle);

        sessions
            .feed(
                id,
                EditorUpdate {
                    title: Some("T".into()),
                    ..Default::default()
                },
            )
            .await;

        // Still inside the settle window.
        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(sessions.status(id).await, SaveStatus::Idle);

        // Past the window: the write has run and the indicator holds
        // "saved" for the display interval.
        tokio::time::sleep(DELAY / 2 + EPSILON).await;
        assert_eq!(sessions.status(id).await, SaveStatus::Saved);

        tokio::time::sleep(SAVED_DISPLAY + EPSILON).await;
        assert_eq!(sessions.status(id).await, SaveStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_write_resets_to_idle_without_surfacing() {
        let writer = Arc::new(RecordingWriter::default());
        writer.fail.store(true, Ordering::SeqCst);
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        sessions
            .feed(
                id,
                EditorUpdate {
                    title: Some("T".into()),
                    ..Default::default()
                },
            )
            .await;
        tokio::time::sleep(DELAY + EPSILON).await;

        assert_eq!(writer.writes().len(), 1, "the write was attempted");
        assert_eq!(sessions.status(id).await, SaveStatus::Idle);

        // The indicator never reaches "saved" later either.
        tokio::time::sleep(SAVED_DISPLAY * 2).await;
        assert_eq!(sessions.status(id).await, SaveStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn close_cancels_pending_writes_in_both_lanes() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);
        let id = uuid::Uuid::new_v4();
        open_session(&sessions, id).await;

        sessions
            .feed(
                id,
                EditorUpdate {
                    title: Some("T".into()),
                    content_en: Some("EN".into()),
                    ..Default::default()
                },
            )
            .await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(sessions.close(id).await);
        tokio::time::sleep(DELAY * 2).await;

        assert!(writer.writes().is_empty());
        assert!(!sessions.is_open(id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn feed_without_a_session_is_a_noop() {
        let writer = Arc::new(RecordingWriter::default());
        let sessions = EditorSessions::new(writer.clone() as Arc<dyn ScriptWriter>);

        let status = sessions
            .feed(
                uuid::Uuid::new_v4(),
                EditorUpdate {
                    title: Some("T".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(status.is_none());
    }
}
