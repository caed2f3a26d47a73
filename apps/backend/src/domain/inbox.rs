use serde::{Deserialize, Serialize};

use super::turn::Turn;

/// A turn awaiting the account's action, with the most recent completed turn
/// of the same game for context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxEntry {
    pub game_id: i64,
    pub previous_turn: Option<Turn>,
}
