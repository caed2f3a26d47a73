//! Services: the engine's components, each owning its injected store handle.

pub mod accounts;
pub mod completion;
pub mod credentials;
pub mod game_store;
pub mod games;
pub mod inbox;
pub mod sessions;
pub mod turn_engine;

pub use accounts::AccountService;
pub use completion::CompletionDetector;
pub use credentials::{Argon2Verifier, CredentialVerifier};
pub use game_store::GameStore;
pub use games::GameService;
pub use inbox::InboxResolver;
pub use sessions::SessionManager;
pub use turn_engine::TurnEngine;
