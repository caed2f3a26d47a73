use std::sync::Arc;

use futures::future::join_all;
use scrawl::domain::turn::TurnPayload;
use scrawl::errors::domain::{ConflictKind, DomainError, ValidationKind};
use scrawl::repos::{games, turns};
use scrawl::services::{InboxResolver, TurnEngine};
use scrawl::AppError;
use serial_test::serial;
use time::Duration;
use tokio::sync::Barrier;

use crate::support::{
    build_file_test_env, build_test_env, drawing_turn, label_turn, register, sample_drawing,
    start_game, EPOCH,
};

fn is_not_your_turn(err: &DomainError) -> bool {
    matches!(err, DomainError::Conflict(ConflictKind::NotYourTurn, _))
}

#[tokio::test]
async fn completes_current_turn_and_extends_deadline() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let game_id = start_game(&env.state, &creator, &[&alice, &bob]).await?;

    env.clock.advance(Duration::hours(5));
    TurnEngine::new(&env.state)
        .claim_and_complete(alice.id, game_id, drawing_turn())
        .await?;

    let game = games::find_by_id(env.state.db(), game_id)
        .await?
        .expect("game exists");
    assert_eq!(
        game.next_expiration,
        EPOCH + Duration::hours(5) + env.state.config().turn_window
    );
    assert!(!game.is_complete());

    let all = turns::find_by_game(env.state.db(), game_id).await?;
    assert!(all[1].is_complete);
    assert_eq!(all[1].drawing, Some(sample_drawing()));
    assert!(!all[2].is_complete);
    Ok(())
}

#[tokio::test]
async fn repeated_claims_have_exactly_one_winner() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let game_id = start_game(&env.state, &creator, &[&alice, &bob]).await?;

    let engine = TurnEngine::new(&env.state);
    let attempts = (0..8).map(|_| {
        let engine = engine.clone();
        let account_id = alice.id;
        async move {
            engine
                .claim_and_complete(account_id, game_id, drawing_turn())
                .await
        }
    });
    let results = join_all(attempts).await;

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(is_not_your_turn));

    let all = turns::find_by_game(env.state.db(), game_id).await?;
    assert_eq!(all.iter().filter(|t| t.is_complete).count(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn claims_racing_on_separate_connections_have_one_winner() -> Result<(), AppError> {
    let env = build_file_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let game_id = start_game(&env.state, &creator, &[&alice, &bob]).await?;

    let attempts = 16;
    let barrier = Arc::new(Barrier::new(attempts));
    let handles: Vec<_> = (0..attempts)
        .map(|_| {
            let engine = TurnEngine::new(&env.state);
            let barrier = barrier.clone();
            let account_id = alice.id;
            tokio::spawn(async move {
                barrier.wait().await;
                engine
                    .claim_and_complete(account_id, game_id, drawing_turn())
                    .await
            })
        })
        .collect();

    let mut wins = 0;
    for handle in handles {
        match handle.await.expect("claim task panicked") {
            Ok(()) => wins += 1,
            Err(err) => assert!(is_not_your_turn(&err), "unexpected error: {err:?}"),
        }
    }
    assert_eq!(wins, 1);

    let all = turns::find_by_game(env.state.db(), game_id).await?;
    assert_eq!(all.iter().filter(|t| t.is_complete).count(), 2);
    assert_eq!(all[1].drawing, Some(sample_drawing()));
    assert!(!all[2].is_complete);
    Ok(())
}

#[tokio::test]
async fn wrong_payload_type_is_rejected_and_turn_unchanged() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let game_id = start_game(&env.state, &creator, &[&alice]).await?;

    let err = TurnEngine::new(&env.state)
        .claim_and_complete(alice.id, game_id, label_turn("a label where a drawing goes"))
        .await
        .unwrap_err();
    assert!(is_not_your_turn(&err));
    assert_eq!(err, DomainError::not_your_turn());

    let current = turns::find_current_turn(env.state.db(), game_id)
        .await?
        .expect("turn still pending");
    assert_eq!(current.account_id, alice.id);
    assert!(!current.is_complete);
    assert_eq!(current.label, "");
    assert!(current.drawing.is_none());

    let game = games::find_by_id(env.state.db(), game_id)
        .await?
        .expect("game exists");
    assert_eq!(game.next_expiration, EPOCH + env.state.config().turn_window);
    Ok(())
}

#[tokio::test]
async fn non_finite_drawing_is_rejected_and_turn_stays_pending() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let game_id = start_game(&env.state, &creator, &[&alice, &bob]).await?;
    let engine = TurnEngine::new(&env.state);

    let mut nan_background = sample_drawing();
    nan_background.background_color.alpha = f64::NAN;
    let mut infinite_point = sample_drawing();
    infinite_point.lines[0].points[1].x = f64::INFINITY;

    for drawing in [nan_background, infinite_point] {
        let err = engine
            .claim_and_complete(alice.id, game_id, TurnPayload::Drawing(drawing))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidTurn, _)
        ));
    }

    let current = turns::find_current_turn(env.state.db(), game_id)
        .await?
        .expect("turn still pending");
    assert_eq!(current.account_id, alice.id);
    assert!(current.drawing.is_none());

    let inbox = InboxResolver::new(&env.state);
    assert_eq!(inbox.pending_turns_for_user(alice.id).await?.len(), 1);
    assert!(inbox.pending_turns_for_user(bob.id).await?.is_empty());

    // a finite drawing still goes through and reaches bob intact
    engine
        .claim_and_complete(alice.id, game_id, drawing_turn())
        .await?;
    let entries = inbox.pending_turns_for_user(bob.id).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].previous_turn.as_ref().and_then(|t| t.drawing.clone()),
        Some(sample_drawing())
    );
    Ok(())
}

#[tokio::test]
async fn out_of_order_and_foreign_submissions_conflict() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let mallory = register(&env.state, "mallory").await?;
    let game_id = start_game(&env.state, &creator, &[&alice, &bob]).await?;
    let engine = TurnEngine::new(&env.state);

    // bob's label turn is not current yet
    let err = engine
        .claim_and_complete(bob.id, game_id, label_turn("too early"))
        .await
        .unwrap_err();
    assert!(is_not_your_turn(&err));

    // mallory has no turn in this game at all
    let err = engine
        .claim_and_complete(mallory.id, game_id, drawing_turn())
        .await
        .unwrap_err();
    assert!(is_not_your_turn(&err));

    // the creator's opening turn is already complete
    let err = engine
        .claim_and_complete(creator.id, game_id, label_turn("again"))
        .await
        .unwrap_err();
    assert!(is_not_your_turn(&err));

    engine
        .claim_and_complete(alice.id, game_id, drawing_turn())
        .await?;
    engine
        .claim_and_complete(bob.id, game_id, label_turn("a cat"))
        .await?;

    // nothing left to play
    let err = engine
        .claim_and_complete(bob.id, game_id, label_turn("encore"))
        .await
        .unwrap_err();
    assert!(is_not_your_turn(&err));
    Ok(())
}

#[tokio::test]
async fn final_turn_completes_the_game() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let creator = register(&env.state, "creator").await?;
    let alice = register(&env.state, "alice").await?;
    let game_id = start_game(&env.state, &creator, &[&alice]).await?;

    TurnEngine::new(&env.state)
        .claim_and_complete(alice.id, game_id, drawing_turn())
        .await?;

    let game = games::find_by_id(env.state.db(), game_id)
        .await?
        .expect("game exists");
    assert!(game.is_complete());

    let record = games::find_completion_for_game(env.state.db(), game_id)
        .await?
        .expect("completion recorded");
    assert_eq!(game.completed_at_id, Some(record.id));
    assert_eq!(record.completed_at, EPOCH);
    Ok(())
}

#[tokio::test]
async fn unknown_game_is_not_your_turn() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let alice = register(&env.state, "alice").await?;

    let err = TurnEngine::new(&env.state)
        .claim_and_complete(alice.id, 9_999, drawing_turn())
        .await
        .unwrap_err();
    assert!(is_not_your_turn(&err));
    Ok(())
}
