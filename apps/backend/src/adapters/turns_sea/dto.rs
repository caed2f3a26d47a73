//! DTOs for turns_sea adapter.

/// DTO for inserting a turn.
#[derive(Debug, Clone)]
pub struct TurnCreate {
    pub game_id: i64,
    pub account_id: i64,
    pub is_complete: bool,
    pub is_drawing: bool,
    pub label: String,
}

impl TurnCreate {
    /// The creator's opening label, already complete.
    pub fn opening_label(game_id: i64, account_id: i64, label: impl Into<String>) -> Self {
        Self {
            game_id,
            account_id,
            is_complete: true,
            is_drawing: false,
            label: label.into(),
        }
    }

    /// A turn waiting to be played.
    pub fn pending(game_id: i64, account_id: i64, is_drawing: bool) -> Self {
        Self {
            game_id,
            account_id,
            is_complete: false,
            is_drawing,
            label: String::new(),
        }
    }
}

/// Content written into a turn when it is completed.
#[derive(Debug, Clone)]
pub enum TurnContent {
    /// Serialized drawing JSON
    Drawing(String),
    Label(String),
}

impl TurnContent {
    pub fn is_drawing(&self) -> bool {
        matches!(self, TurnContent::Drawing(_))
    }
}
