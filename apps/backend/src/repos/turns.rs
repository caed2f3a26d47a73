//! Turn repository functions (generic over ConnectionTrait).
//!
//! Converts stored rows into [`Turn`]s. Drawing JSON is parsed only for
//! drawing turns; a completed drawing turn whose payload is missing or
//! unreadable is reported as data corruption.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::adapters::turns_sea::{self as turns_adapter, TurnContent, TurnCreate};
use crate::domain::drawing::Drawing;
use crate::domain::turn::{Turn, TurnPayload};
use crate::entities::{accounts, turns};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::infra::db_errors::is_fk_violation;

/// A stored row that may or may not decode into a [`Turn`].
pub type DecodedTurn = Result<Turn, DomainError>;

fn corrupt(turn_id: i64) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Turn {turn_id} has an unreadable drawing"),
    )
}

impl TryFrom<turns::Model> for Turn {
    type Error = DomainError;

    fn try_from(model: turns::Model) -> Result<Self, Self::Error> {
        let drawing = if model.is_drawing {
            match model.drawing.as_deref() {
                Some(raw) => Some(Drawing::from_json(raw).map_err(|e| {
                    debug!(turn_id = model.id, error = %e, "drawing JSON did not parse");
                    corrupt(model.id)
                })?),
                None if model.is_complete => return Err(corrupt(model.id)),
                None => None,
            }
        } else {
            None
        };

        Ok(Turn {
            id: model.id,
            game_id: model.game_id,
            account_id: model.account_id,
            is_complete: model.is_complete,
            is_drawing: model.is_drawing,
            label: model.label,
            drawing,
        })
    }
}

/// Insert a turn. A foreign-key failure means the player id names no
/// account and is reported as a validation error naming that id.
pub async fn create_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnCreate,
) -> Result<Turn, DomainError> {
    let account_id = dto.account_id;
    let turn = turns_adapter::create_turn(conn, dto)
        .await
        .map_err(|e| {
            if is_fk_violation(&e) {
                DomainError::validation(
                    ValidationKind::UnknownPlayer(account_id),
                    format!("No such player id {account_id}."),
                )
            } else {
                DomainError::from(e)
            }
        })?;
    Turn::try_from(turn)
}

/// Complete the game's current turn for `account_id` with `payload`.
///
/// Returns false when no turn matched (not the account's turn, wrong turn
/// type, or not the current turn).
pub async fn complete_current_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    game_id: i64,
    payload: TurnPayload,
) -> Result<bool, DomainError> {
    let content = match payload {
        TurnPayload::Drawing(drawing) => TurnContent::Drawing(drawing.to_json().map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other(format!("drawing encode: {e}")),
                "Unable to store the drawing",
            )
        })?),
        TurnPayload::Label(label) => TurnContent::Label(label),
    };
    let rows = turns_adapter::complete_current_turn(conn, account_id, game_id, content).await?;
    Ok(rows == 1)
}

/// Previous turns of every game whose current turn the account owes,
/// decoded row by row so one bad row does not fail the others.
pub async fn previous_turns_owed_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
) -> Result<Vec<DecodedTurn>, DomainError> {
    let rows = turns_adapter::find_previous_turns_owed_by(conn, account_id).await?;
    Ok(rows.into_iter().map(Turn::try_from).collect())
}

pub async fn find_current_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Turn>, DomainError> {
    turns_adapter::find_current_turn(conn, game_id)
        .await?
        .map(Turn::try_from)
        .transpose()
}

/// The previous turn of a single game the account owes, in one query.
pub async fn previous_turn_owed_in_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: i64,
    game_id: i64,
) -> Result<Option<Turn>, DomainError> {
    turns_adapter::find_previous_turn_owed_in_game(conn, account_id, game_id)
        .await?
        .map(Turn::try_from)
        .transpose()
}

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Turn>, DomainError> {
    turns_adapter::find_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(Turn::try_from)
        .collect()
}

/// Turns of the given games in play order as `(game_id, player, turn)`,
/// where `player` is the display name (empty if the account row is gone).
pub async fn turns_with_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: Vec<i64>,
) -> Result<Vec<(i64, String, DecodedTurn)>, DomainError> {
    let rows = turns_adapter::find_turns_with_players(conn, game_ids).await?;
    Ok(rows
        .into_iter()
        .map(|(turn, account): (turns::Model, Option<accounts::Model>)| {
            let player = account.map(|a| a.display_name).unwrap_or_default();
            (turn.game_id, player, Turn::try_from(turn))
        })
        .collect())
}

pub async fn delete_unplayed_if_expired<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    now: time::OffsetDateTime,
) -> Result<u64, DomainError> {
    Ok(turns_adapter::delete_unplayed_if_expired(conn, game_id, now).await?)
}
