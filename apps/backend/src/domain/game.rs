use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::turn::Turn;

/// A turn in a finished game, with the display name of its player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayedTurn {
    pub player: String,
    #[serde(flatten)]
    pub turn: Turn,
}

/// A completed game and every turn in play order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: i64,
    /// Completion record id; increases with completion order
    pub completion_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
    pub turns: Vec<PlayedTurn>,
}
