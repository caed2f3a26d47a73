//! JSON envelope exchanged with clients.
//!
//! Every field is optional and omitted when absent, so one `Message` type
//! carries requests, responses and errors alike.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::drawing::Drawing;
use crate::domain::game::{GameRecord, PlayedTurn};
use crate::domain::inbox::InboxEntry;
use crate::domain::turn::{Turn, TurnPayload};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::accounts::Account;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games: Option<Vec<GameMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox_entries: Option<Vec<InboxEntryMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbox_entry: Option<InboxEntryMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_game: Option<NewGameMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<TurnMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserMessage>,
}

/// Error messages keyed by the subject they concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Errors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub application: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_game: Option<NewGameErrors>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display_name: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub password: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGameErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl From<Account> for UserMessage {
    fn from(account: Account) -> Self {
        Self {
            id: Some(account.id),
            display_name: Some(account.display_name),
            password: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGameMessage {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub players: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_drawing: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<Drawing>,
}

impl From<Turn> for TurnMessage {
    fn from(turn: Turn) -> Self {
        Self {
            player: None,
            is_drawing: turn.is_drawing,
            label: if turn.is_drawing { String::new() } else { turn.label },
            drawing: turn.drawing,
        }
    }
}

impl From<PlayedTurn> for TurnMessage {
    fn from(played: PlayedTurn) -> Self {
        Self {
            player: Some(played.player),
            ..TurnMessage::from(played.turn)
        }
    }
}

impl TryFrom<TurnMessage> for TurnPayload {
    type Error = DomainError;

    fn try_from(message: TurnMessage) -> Result<Self, Self::Error> {
        if message.is_drawing {
            message.drawing.map(TurnPayload::Drawing).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidTurn,
                    "A drawing turn requires a drawing.",
                )
            })
        } else {
            Ok(TurnPayload::Label(message.label))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboxEntryMessage {
    pub game_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_turn: Option<TurnMessage>,
}

impl From<InboxEntry> for InboxEntryMessage {
    fn from(entry: InboxEntry) -> Self {
        Self {
            game_id: entry.game_id,
            previous_turn: entry.previous_turn.map(TurnMessage::from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMessage {
    pub game_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_id: Option<i64>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub turns: Vec<TurnMessage>,
}

impl GameMessage {
    pub fn started(game_id: i64) -> Self {
        Self {
            game_id,
            ..Self::default()
        }
    }
}

impl From<GameRecord> for GameMessage {
    fn from(record: GameRecord) -> Self {
        Self {
            game_id: record.id,
            completed_at_id: Some(record.completion_id),
            completed_at: Some(record.completed_at),
            turns: record.turns.into_iter().map(TurnMessage::from).collect(),
        }
    }
}
