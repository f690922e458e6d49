//! Domain types and shared utilities for the ScriptFlow backend.

pub mod debounce;
pub mod error;
pub mod prefs;
pub mod prompts;
pub mod script;
pub mod types;
