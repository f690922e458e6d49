//! Persisted editor preferences.
//!
//! A single JSON blob (`{ "geminiModel": "..." }`) stored in one file.
//! Read once when the editor mounts, written only on an explicit save
//! action. The storage medium is a file here; the contract is the blob.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default preference file name, placed in the data directory.
pub const DEFAULT_SETTINGS_FILE: &str = "scriptflow_settings.json";

/// The preference blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Selected text-generation model id. `None` means the process-wide
    /// default model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_model: Option<String>,
}

/// File-backed key-value store for the preference blob.
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the preference blob.
    ///
    /// A missing file yields defaults. A corrupt file also yields
    /// defaults with a logged warning, so a bad write can never lock the
    /// user out of the editor.
    pub async fn load(&self) -> Result<Preferences, CoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(err) => {
                return Err(CoreError::Internal(format!(
                    "Failed to read settings file {}: {err}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(prefs) => Ok(prefs),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to parse saved settings, using defaults",
                );
                Ok(Preferences::default())
            }
        }
    }

    /// Persist the preference blob, replacing the previous one.
    pub async fn save(&self, prefs: &Preferences) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                CoreError::Internal(format!(
                    "Failed to create settings directory {}: {err}",
                    parent.display()
                ))
            })?;
        }

        let raw = serde_json::to_string_pretty(prefs)
            .map_err(|err| CoreError::Internal(format!("Failed to serialize settings: {err}")))?;

        tokio::fs::write(&self.path, raw).await.map_err(|err| {
            CoreError::Internal(format!(
                "Failed to write settings file {}: {err}",
                self.path.display()
            ))
        })
    }
}
