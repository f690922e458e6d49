//! HTTP request handlers, grouped by resource.

pub mod actions;
pub mod audio;
pub mod editor;
pub mod scripts;
pub mod settings;
