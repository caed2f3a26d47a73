//! Operation boundary consumed by the HTTP layer.
//!
//! Each operation takes already-authenticated ids plus the relevant part of
//! the request envelope and answers with a response envelope. Failures are
//! rendered into `errors`, keyed by subject; storage details never leave
//! this layer.

use tracing::debug;

use crate::domain::turn::TurnPayload;
use crate::error::AppError;
use crate::protocol::message::{
    GameMessage, InboxEntryMessage, Message, Meta, NewGameMessage, TurnMessage, UserMessage,
};
use crate::services::{
    AccountService, GameService, GameStore, InboxResolver, SessionManager, TurnEngine,
};
use crate::state::AppState;

fn respond(operation: &'static str, result: Result<Message, AppError>) -> Message {
    result.unwrap_or_else(|e| {
        debug!(operation, code = %e.code(), detail = e.detail(), "operation failed");
        e.to_message()
    })
}

fn user_fields(user: UserMessage) -> (String, String) {
    (
        user.display_name.unwrap_or_default(),
        user.password.unwrap_or_default(),
    )
}

#[derive(Debug, Clone)]
pub struct Api {
    accounts: AccountService,
    games: GameService,
    game_store: GameStore,
    inbox: InboxResolver,
    sessions: SessionManager,
    turns: TurnEngine,
}

impl Api {
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: AccountService::new(state),
            games: GameService::new(state),
            game_store: GameStore::new(state),
            inbox: InboxResolver::new(state),
            sessions: SessionManager::new(state),
            turns: TurnEngine::new(state),
        }
    }

    pub async fn start_game(&self, creator_id: i64, new_game: NewGameMessage) -> Message {
        let result = self
            .game_store
            .create_game(creator_id, &new_game.label, &new_game.players)
            .await
            .map(|game| Message {
                game: Some(GameMessage::started(game.id)),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("start_game", result)
    }

    pub async fn submit_turn(&self, account_id: i64, game_id: i64, turn: TurnMessage) -> Message {
        let result = async {
            let payload = TurnPayload::try_from(turn)?;
            self.turns
                .claim_and_complete(account_id, game_id, payload)
                .await?;
            Ok::<_, AppError>(Message::default())
        }
        .await;
        respond("submit_turn", result)
    }

    pub async fn list_inbox(&self, account_id: i64) -> Message {
        let result = self
            .inbox
            .pending_turns_for_user(account_id)
            .await
            .map(|entries| Message {
                inbox_entries: Some(entries.into_iter().map(InboxEntryMessage::from).collect()),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("list_inbox", result)
    }

    pub async fn inbox_entry(&self, account_id: i64, game_id: i64) -> Message {
        let result = self
            .inbox
            .pending_turn_for_game(account_id, game_id)
            .await
            .map(|entry| Message {
                inbox_entry: Some(InboxEntryMessage::from(entry)),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("inbox_entry", result)
    }

    pub async fn mint_session(&self, account_id: i64) -> Message {
        let result = self
            .sessions
            .new_token(account_id)
            .await
            .map(|token| Message {
                meta: Some(Meta { auth: Some(token) }),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("mint_session", result)
    }

    /// Resolve a bearer token to the account it authenticates.
    pub async fn resolve_session(&self, token: &str) -> Result<i64, AppError> {
        Ok(self.sessions.lookup(token).await?)
    }

    pub async fn register(&self, user: UserMessage) -> Message {
        let (display_name, password) = user_fields(user);
        let result = self
            .accounts
            .register(&display_name, &password)
            .await
            .map(|account| Message {
                user: Some(UserMessage::from(account)),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("register", result)
    }

    pub async fn login(&self, user: UserMessage) -> Message {
        let (display_name, password) = user_fields(user);
        let result = self
            .accounts
            .login(&display_name, &password)
            .await
            .map(|(account, token)| Message {
                meta: Some(Meta { auth: Some(token) }),
                user: Some(UserMessage::from(account)),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("login", result)
    }

    pub async fn update_password(&self, account_id: i64, user: UserMessage) -> Message {
        let (_, password) = user_fields(user);
        let result = self
            .accounts
            .set_password(account_id, &password)
            .await
            .map(|account| Message {
                user: Some(UserMessage::from(account)),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("update_password", result)
    }

    pub async fn lookup_contact(&self, display_name: &str) -> Message {
        let result = self
            .accounts
            .lookup_contact(display_name)
            .await
            .map(|account| Message {
                user: Some(UserMessage::from(account)),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("lookup_contact", result)
    }

    /// Completed games newer than `since_completion_id` (0 for all).
    pub async fn game_history(&self, account_id: i64, since_completion_id: i64) -> Message {
        let result = self
            .games
            .completed_games(account_id, since_completion_id)
            .await
            .map(|records| Message {
                games: Some(records.into_iter().map(GameMessage::from).collect()),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("game_history", result)
    }

    pub async fn game(&self, account_id: i64, game_id: i64) -> Message {
        let result = self
            .games
            .game_by_id(account_id, game_id)
            .await
            .map(|record| Message {
                game: Some(GameMessage::from(record)),
                ..Message::default()
            })
            .map_err(AppError::from);
        respond("game", result)
    }
}
