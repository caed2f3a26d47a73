pub mod accounts;
pub mod games;
pub mod games_completed_at;
pub mod sessions;
pub mod turns;

pub use accounts::Entity as Accounts;
pub use accounts::Model as Account;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use games_completed_at::Entity as GamesCompletedAt;
pub use games_completed_at::Model as GameCompletedAt;
pub use sessions::Entity as Sessions;
pub use sessions::Model as Session;
pub use turns::Entity as Turns;
pub use turns::Model as Turn;
