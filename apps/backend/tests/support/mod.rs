//! Shared fixtures for the integration suites.
//!
//! Every state gets its own in-memory SQLite database, a manual clock
//! pinned to a whole second and a cheap credential verifier so tests do
//! not pay for Argon2. Races that need more than one connection use a
//! file database in a temp dir instead.

use std::env;
use std::sync::Arc;

use backend_test_support::unique_helpers::{unique_display_name, unique_str};
use scrawl::domain::clock::ManualClock;
use scrawl::domain::drawing::{Color, Drawing, Line, Point};
use scrawl::domain::player_order::{GivenOrder, PlayerOrder};
use scrawl::domain::turn::TurnPayload;
use scrawl::errors::domain::DomainError;
use scrawl::infra::state::{build_state, StateBuilder};
use scrawl::repos::accounts::Account;
use scrawl::services::{AccountService, CredentialVerifier, GameStore, TurnEngine};
use scrawl::{AppError, AppState, DbKind, DbProfile};
use tempfile::TempDir;
use time::macros::datetime;
use time::OffsetDateTime;

pub const EPOCH: OffsetDateTime = datetime!(2025-01-01 00:00 UTC);

pub const PASSWORD: &str = "hunter2hunter2";

/// Stores the secret with a fixed prefix. Only for tests.
#[derive(Debug, Default)]
pub struct PlainVerifier;

impl CredentialVerifier for PlainVerifier {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{secret}"))
    }

    fn verify(&self, secret: &str, digest: &str) -> bool {
        digest.strip_prefix("plain:") == Some(secret)
    }
}

pub struct TestEnv {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    /// Holds the file database of a file-backed env; removed on drop.
    pub db_dir: Option<TempDir>,
}

pub fn test_state_builder(clock: Arc<ManualClock>) -> StateBuilder {
    build_state()
        .with_db(DbProfile::Test)
        .with_db_kind(DbKind::SqliteMemory)
        .with_clock(clock)
        .with_player_order(Arc::new(GivenOrder))
        .with_credentials(Arc::new(PlainVerifier))
}

pub async fn build_test_env() -> Result<TestEnv, AppError> {
    build_test_env_with_order(Arc::new(GivenOrder)).await
}

pub async fn build_test_env_with_order(
    order: Arc<dyn PlayerOrder>,
) -> Result<TestEnv, AppError> {
    let clock = Arc::new(ManualClock::new(EPOCH));
    let state = test_state_builder(clock.clone())
        .with_player_order(order)
        .build()
        .await?;
    Ok(TestEnv {
        state,
        clock,
        db_dir: None,
    })
}

/// Like `build_test_env`, but backed by a SQLite file with a multi-connection
/// pool so concurrent calls really contend.
///
/// Sets `SQLITE_DB_DIR` and `TEST_DB`, so callers must be `#[serial]`.
pub async fn build_file_test_env() -> Result<TestEnv, AppError> {
    let dir = TempDir::new().map_err(|e| AppError::internal(format!("temp dir: {e}")))?;
    let db_name = format!("{}_test", unique_str("race").to_lowercase().replace('-', "_"));
    env::set_var("SQLITE_DB_DIR", dir.path());
    env::set_var("TEST_DB", &db_name);

    let clock = Arc::new(ManualClock::new(EPOCH));
    let state = test_state_builder(clock.clone())
        .with_db_kind(DbKind::SqliteFile)
        .build()
        .await?;
    Ok(TestEnv {
        state,
        clock,
        db_dir: Some(dir),
    })
}

/// Register an account with a unique display name derived from `prefix`.
pub async fn register(state: &AppState, prefix: &str) -> Result<Account, AppError> {
    let accounts = AccountService::new(state);
    Ok(accounts
        .register(&unique_display_name(prefix), PASSWORD)
        .await?)
}

pub async fn register_many(state: &AppState, n: usize) -> Result<Vec<Account>, AppError> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(register(state, &format!("player{i}")).await?);
    }
    Ok(out)
}

/// Start a game with the given creator and players; returns the game id.
pub async fn start_game(
    state: &AppState,
    creator: &Account,
    players: &[&Account],
) -> Result<i64, AppError> {
    let ids: Vec<i64> = players.iter().map(|p| p.id).collect();
    let game = GameStore::new(state).create_game(creator.id, "cat", &ids).await?;
    Ok(game.id)
}

pub fn sample_drawing() -> Drawing {
    Drawing {
        background_color: Color {
            alpha: 1.0,
            red: 0.1,
            green: 0.2,
            blue: 0.30000000000000004,
        },
        lines: vec![Line {
            color: Color {
                alpha: 0.5,
                red: 1.0 / 3.0,
                green: 0.0,
                blue: 1e-9,
            },
            size: 2.5,
            points: vec![
                Point { x: 0.0, y: 0.0 },
                Point {
                    x: 12.345678901234567,
                    y: -7.25,
                },
            ],
        }],
    }
}

pub fn drawing_turn() -> TurnPayload {
    TurnPayload::Drawing(sample_drawing())
}

pub fn label_turn(label: &str) -> TurnPayload {
    TurnPayload::Label(label.to_string())
}

/// Play every pending turn of a game in order, alternating drawing and label.
pub async fn play_out(state: &AppState, game_id: i64, players: &[&Account]) -> Result<(), AppError> {
    let engine = TurnEngine::new(state);
    for (position, player) in players.iter().enumerate() {
        let payload = if position % 2 == 0 {
            drawing_turn()
        } else {
            label_turn(&format!("guess {position}"))
        };
        engine.claim_and_complete(player.id, game_id, payload).await?;
    }
    Ok(())
}
