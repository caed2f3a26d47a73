//! DTOs for games_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new, incomplete game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub created_at: OffsetDateTime,
    pub next_expiration: OffsetDateTime,
}

impl GameCreate {
    pub fn new(created_at: OffsetDateTime, next_expiration: OffsetDateTime) -> Self {
        Self {
            created_at,
            next_expiration,
        }
    }
}
