//! Repository functions: domain models over the sea-orm adapters.

pub mod accounts;
pub mod games;
pub mod sessions;
pub mod turns;
