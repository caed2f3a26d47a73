use std::sync::Arc;

use futures::future::join_all;
use scrawl::entities::games_completed_at;
use scrawl::repos::games;
use scrawl::services::{CompletionDetector, TurnEngine};
use scrawl::AppError;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serial_test::serial;
use tokio::sync::Barrier;

use crate::support::{
    build_file_test_env, build_test_env, drawing_turn, play_out, register, start_game,
};

async fn completion_rows(state: &scrawl::AppState, game_id: i64) -> Result<u64, AppError> {
    Ok(games_completed_at::Entity::find()
        .filter(games_completed_at::Column::GameId.eq(game_id))
        .count(state.db())
        .await?)
}

#[tokio::test]
async fn unfinished_game_is_a_no_op() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let game_id = start_game(&env.state, &creator, &[&alice, &bob]).await?;

    TurnEngine::new(&env.state)
        .claim_and_complete(alice.id, game_id, drawing_turn())
        .await?;

    let created = CompletionDetector::new(&env.state)
        .maybe_complete_game(game_id)
        .await?;
    assert!(!created);
    assert_eq!(completion_rows(&env.state, game_id).await?, 0);

    let game = games::find_by_id(env.state.db(), game_id)
        .await?
        .expect("game exists");
    assert_eq!(game.completed_at_id, None);
    Ok(())
}

#[tokio::test]
async fn repeated_detection_records_exactly_once() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let game_id = start_game(&env.state, &creator, &[&alice]).await?;

    // Complete the last turn directly so no detector has run yet
    scrawl::repos::turns::complete_current_turn(env.state.db(), alice.id, game_id, drawing_turn())
        .await?;

    let detector = CompletionDetector::new(&env.state);
    let calls = (0..6).map(|_| {
        let detector = detector.clone();
        async move { detector.maybe_complete_game(game_id).await }
    });
    let results = join_all(calls).await;

    let mut created = 0;
    for result in results {
        if result? {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(completion_rows(&env.state, game_id).await?, 1);

    let record = games::find_completion_for_game(env.state.db(), game_id)
        .await?
        .expect("completion recorded");
    let game = games::find_by_id(env.state.db(), game_id)
        .await?
        .expect("game exists");
    assert_eq!(game.completed_at_id, Some(record.id));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn detection_racing_on_separate_connections_records_once() -> Result<(), AppError> {
    let env = build_file_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let game_id = start_game(&env.state, &creator, &[&alice]).await?;

    scrawl::repos::turns::complete_current_turn(env.state.db(), alice.id, game_id, drawing_turn())
        .await?;

    let detectors = 12;
    let barrier = Arc::new(Barrier::new(detectors));
    let handles: Vec<_> = (0..detectors)
        .map(|_| {
            let detector = CompletionDetector::new(&env.state);
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                detector.maybe_complete_game(game_id).await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.expect("detector task panicked")? {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(completion_rows(&env.state, game_id).await?, 1);

    let record = games::find_completion_for_game(env.state.db(), game_id)
        .await?
        .expect("completion recorded");
    let game = games::find_by_id(env.state.db(), game_id)
        .await?
        .expect("game exists");
    assert_eq!(game.completed_at_id, Some(record.id));
    Ok(())
}

#[tokio::test]
async fn completed_game_stays_completed_with_one_record() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let game_id = start_game(&env.state, &creator, &[&alice, &bob]).await?;

    play_out(&env.state, game_id, &[&alice, &bob]).await?;
    assert_eq!(completion_rows(&env.state, game_id).await?, 1);

    let created = CompletionDetector::new(&env.state)
        .maybe_complete_game(game_id)
        .await?;
    assert!(!created);
    assert_eq!(completion_rows(&env.state, game_id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn unknown_game_is_a_no_op() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let created = CompletionDetector::new(&env.state)
        .maybe_complete_game(12_345)
        .await?;
    assert!(!created);
    Ok(())
}
