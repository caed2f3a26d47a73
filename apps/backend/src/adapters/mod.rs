//! Adapters for external dependencies.

pub mod accounts_sea;
pub mod games_sea;
pub mod sessions_sea;
pub mod turns_sea;
