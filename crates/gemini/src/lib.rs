//! Retrying client for the Gemini text-generation API.
//!
//! [`GeminiClient`] wraps the raw HTTP call with bounded
//! exponential-backoff retry for transient network failures and maps
//! every failure path into the [`GeminiError`] taxonomy. An empty
//! generation result is a failure, never a success.

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod retry;

pub use client::{GeminiClient, GeminiConfig};
pub use error::GeminiError;
pub use models::DEFAULT_MODEL;
