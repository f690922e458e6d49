//! Per-script in-flight action flags.
//!
//! At most one AI text action may run per script at a time; narration has
//! its own independent flag so audio generation can proceed while a text
//! action is in flight. Flags are released through RAII so a failed or
//! panicked handler can never wedge a script.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use scriptflow_core::error::CoreError;
use scriptflow_core::types::ScriptId;

/// Which in-flight lane a guard occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLane {
    /// AI text actions (fix-CTA, rewrite-hook, shorten, translate).
    Text,
    /// Narration (TTS + upload).
    Audio,
}

#[derive(Debug, Default)]
struct ScriptFlags {
    text: bool,
    audio: bool,
}

/// Registry of per-script busy flags, shared across handlers.
#[derive(Clone, Default)]
pub struct ActionGuards {
    flags: Arc<Mutex<HashMap<ScriptId, ScriptFlags>>>,
}

impl ActionGuards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a lane for a script. Fails with a conflict when the lane is
    /// already occupied; the other lane is not consulted.
    pub fn acquire(&self, id: ScriptId, lane: ActionLane) -> Result<ActionGuard, CoreError> {
        let mut flags = self.flags.lock().unwrap_or_else(|e| e.into_inner());
        let entry = flags.entry(id).or_default();

        let occupied = match lane {
            ActionLane::Text => &mut entry.text,
            ActionLane::Audio => &mut entry.audio,
        };
        if *occupied {
            return Err(CoreError::Conflict(match lane {
                ActionLane::Text => "An AI action is already running for this script".to_string(),
                ActionLane::Audio => "Audio generation is already running for this script".to_string(),
            }));
        }
        *occupied = true;

        Ok(ActionGuard {
            flags: Arc::clone(&self.flags),
            id,
            lane,
        })
    }
}

/// RAII claim on one lane of one script; the flag clears on drop.
pub struct ActionGuard {
    flags: Arc<Mutex<HashMap<ScriptId, ScriptFlags>>>,
    id: ScriptId,
    lane: ActionLane,
}

impl Drop for ActionGuard {
    fn drop(&mut self) {
        let mut flags = self.flags.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = flags.get_mut(&self.id) {
            match self.lane {
                ActionLane::Text => entry.text = false,
                ActionLane::Audio => entry.audio = false,
            }
            if !entry.text && !entry.audio {
                flags.remove(&self.id);
            }
        }
    }
}
