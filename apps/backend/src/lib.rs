#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Transactional game-state and session engine for an asynchronous
//! draw-and-label party game.

pub mod adapters;
pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod protocol;
pub mod repos;
pub mod services;
pub mod state;

// Re-exports for public API
pub use api::Api;
pub use config::db::{db_url, DbKind, DbProfile};
pub use config::engine::EngineConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
