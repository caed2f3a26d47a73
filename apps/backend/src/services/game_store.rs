//! GameStore: creates a game together with its full turn sequence.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::Duration;
use tracing::{debug, info, warn};

use crate::adapters::turns_sea::TurnCreate;
use crate::db::txn::with_txn;
use crate::domain::clock::Clock;
use crate::domain::player_order::PlayerOrder;
use crate::domain::turn::is_drawing_position;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{self, Game};
use crate::repos::turns;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct GameStore {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    player_order: Arc<dyn PlayerOrder>,
    turn_window: Duration,
}

impl GameStore {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db().clone(),
            clock: state.clock(),
            player_order: state.player_order(),
            turn_window: state.config().turn_window,
        }
    }

    /// Start a game: the creator's completed opening label followed by one
    /// pending turn per player, in the order chosen by the injected
    /// [`PlayerOrder`], alternating drawing and label starting with drawing.
    /// A label of only whitespace counts as missing.
    ///
    /// Everything is inserted in one transaction; an unknown player id
    /// aborts it and nothing is left behind.
    pub async fn create_game(
        &self,
        creator_id: i64,
        label: &str,
        players: &[i64],
    ) -> Result<Game, DomainError> {
        if label.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::LabelRequired,
                "A label is required to start a game.",
            ));
        }
        if players.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::PlayersRequired,
                "At least one other player is required.",
            ));
        }

        let mut order = players.to_vec();
        self.player_order.arrange(&mut order);
        debug!(creator_id, players = ?order, "assigned play order");

        let now = self.clock.now();
        let next_expiration = now + self.turn_window;
        let label = label.to_string();

        let result = with_txn(&self.db, move |txn| {
            Box::pin(async move {
                let game = games::create_game(txn, now, next_expiration).await?;
                turns::create_turn(txn, TurnCreate::opening_label(game.id, creator_id, label))
                    .await?;
                for (position, player_id) in order.into_iter().enumerate() {
                    let dto = TurnCreate::pending(game.id, player_id, is_drawing_position(position));
                    turns::create_turn(txn, dto).await?;
                }
                Ok::<_, DomainError>(game)
            })
        })
        .await;

        match result {
            Ok(game) => {
                info!(game_id = game.id, creator_id, players = players.len(), "game created");
                Ok(game)
            }
            Err(e) => {
                warn!(creator_id, error = %e, "game creation rolled back");
                Err(e)
            }
        }
    }
}
