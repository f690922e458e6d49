//! Narration pipeline: Minimax text-to-speech plus object-storage upload.
//!
//! Unlike the best-effort autosave writes, every failure in this crate
//! is fatal to the narration action and surfaces to the caller.

pub mod narrator;
pub mod storage;
pub mod tts;

pub use narrator::{NarrationError, Narrator};
pub use storage::{ObjectStorage, StorageConfig, StorageError};
pub use tts::{MinimaxTts, TtsConfig, TtsError};
