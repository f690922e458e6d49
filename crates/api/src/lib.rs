//! ScriptFlow API server library.
//!
//! Exposes the building blocks (config, state, error handling, autosave
//! coordinator, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod autosave;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
