use serde::{Deserialize, Serialize};

use super::drawing::Drawing;

/// What a player submits for their turn. The variant must match the turn's
/// fixed type.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnPayload {
    Drawing(Drawing),
    Label(String),
}

impl TurnPayload {
    pub fn is_drawing(&self) -> bool {
        matches!(self, TurnPayload::Drawing(_))
    }
}

/// A turn as read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: i64,
    pub game_id: i64,
    pub account_id: i64,
    pub is_complete: bool,
    pub is_drawing: bool,
    pub label: String,
    /// Present only on completed drawing turns
    pub drawing: Option<Drawing>,
}

/// Turn type by play position among the non-creator turns: drawing first,
/// then alternating.
pub fn is_drawing_position(position: usize) -> bool {
    position % 2 == 0
}
