use scrawl::entities::sessions;
use scrawl::errors::domain::{DomainError, NotFoundKind};
use scrawl::services::SessionManager;
use scrawl::AppError;
use sea_orm::{EntityTrait, PaginatorTrait};
use time::Duration;

use crate::support::{build_test_env, register};

fn is_invalid_session(err: &DomainError) -> bool {
    matches!(err, DomainError::NotFound(NotFoundKind::Session, _))
}

#[tokio::test]
async fn minted_token_resolves_to_its_account() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let alice = register(&env.state, "alice").await?;
    let bob = register(&env.state, "bob").await?;
    let manager = SessionManager::new(&env.state);

    let alice_token = manager.new_token(alice.id).await?;
    let bob_token = manager.new_token(bob.id).await?;
    assert_ne!(alice_token, bob_token);

    assert_eq!(manager.lookup(&alice_token).await?, alice.id);
    assert_eq!(manager.lookup(&bob_token).await?, bob.id);
    Ok(())
}

#[tokio::test]
async fn unknown_token_is_rejected() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let err = SessionManager::new(&env.state)
        .lookup("definitely-not-a-real-session-token")
        .await
        .unwrap_err();
    assert!(is_invalid_session(&err));
    assert_eq!(
        err,
        DomainError::not_found(NotFoundKind::Session, "Invalid authentication token.")
    );
    Ok(())
}

#[tokio::test]
async fn token_expires_after_ttl() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let alice = register(&env.state, "alice").await?;
    let manager = SessionManager::new(&env.state);
    let ttl = env.state.config().session_ttl;

    let token = manager.new_token(alice.id).await?;

    env.clock.advance(ttl - Duration::seconds(1));
    assert_eq!(manager.lookup(&token).await?, alice.id);

    env.clock.advance(Duration::seconds(2));
    let err = manager.lookup(&token).await.unwrap_err();
    assert!(is_invalid_session(&err));
    Ok(())
}

#[tokio::test]
async fn minting_prunes_expired_sessions() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let alice = register(&env.state, "alice").await?;
    let manager = SessionManager::new(&env.state);

    manager.new_token(alice.id).await?;
    manager.new_token(alice.id).await?;
    assert_eq!(sessions::Entity::find().count(env.state.db()).await?, 2);

    env.clock
        .advance(env.state.config().session_ttl + Duration::seconds(1));
    let fresh = manager.new_token(alice.id).await?;

    assert_eq!(sessions::Entity::find().count(env.state.db()).await?, 1);
    assert_eq!(manager.lookup(&fresh).await?, alice.id);
    Ok(())
}
