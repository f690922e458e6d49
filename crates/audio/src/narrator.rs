//! Narration orchestration: synthesize speech, then persist it.

use chrono::Utc;
use tracing::info;

use scriptflow_core::types::{ScriptId, Timestamp};

use crate::storage::{ObjectStorage, StorageError};
use crate::tts::{MinimaxTts, TtsError};

/// MIME type of synthesized narration.
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Errors from the narration pipeline. Both stages are fatal to the
/// requesting action.
#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error(transparent)]
    Tts(#[from] TtsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Runs the two-stage narration pipeline for a script.
pub struct Narrator {
    tts: MinimaxTts,
    storage: ObjectStorage,
}

impl Narrator {
    pub fn new(tts: MinimaxTts, storage: ObjectStorage) -> Self {
        Self { tts, storage }
    }

    /// Storage path for a script's narration. The millisecond timestamp
    /// keeps repeated narrations of the same script from colliding under
    /// the no-overwrite upload policy.
    pub fn audio_path(script_id: ScriptId, at: Timestamp) -> String {
        format!("public/{script_id}_{}.mp3", at.timestamp_millis())
    }

    /// Synthesize narration for `text` and upload it, returning the
    /// public URL of the stored audio.
    pub async fn narrate(&self, text: &str, script_id: ScriptId) -> Result<String, NarrationError> {
        let audio = self.tts.synthesize(text).await?;
        info!(%script_id, bytes = audio.len(), "synthesized narration audio");

        let path = Self::audio_path(script_id, Utc::now());
        let url = self
            .storage
            .upload(&path, audio, AUDIO_CONTENT_TYPE)
            .await?;
        info!(%script_id, %url, "uploaded narration audio");

        Ok(url)
    }
}
