use backend_test_support::unique_helpers::unique_display_name;
use scrawl::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use scrawl::services::{AccountService, SessionManager};
use scrawl::AppError;

use crate::support::{build_test_env, register, PASSWORD};

#[tokio::test]
async fn register_trims_and_login_mints_a_session() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let accounts = AccountService::new(&env.state);
    let name = unique_display_name("alice");

    let account = accounts.register(&format!("  {name}\t"), PASSWORD).await?;
    assert_eq!(account.display_name, name);
    assert!(account.id > 0);

    let (logged_in, token) = accounts.login(&name, PASSWORD).await?;
    assert_eq!(logged_in.id, account.id);
    assert_eq!(
        SessionManager::new(&env.state).lookup(&token).await?,
        account.id
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_display_name_conflicts() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let accounts = AccountService::new(&env.state);
    let name = unique_display_name("dupe");

    accounts.register(&name, PASSWORD).await?;
    let err = accounts.register(&name, PASSWORD).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DisplayNameTaken, _)
    ));
    Ok(())
}

#[tokio::test]
async fn register_validates_name_and_password() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let accounts = AccountService::new(&env.state);

    let err = accounts.register("   ", PASSWORD).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::DisplayNameRequired, _)
    ));

    let err = accounts
        .register(&unique_display_name("shorty"), "short")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::validation(
            ValidationKind::PasswordTooShort,
            "Password must be at least 8 characters."
        )
    );
    Ok(())
}

#[tokio::test]
async fn login_failures_are_distinguished() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let accounts = AccountService::new(&env.state);
    let alice = register(&env.state, "alice").await?;

    let err = accounts
        .login(&unique_display_name("ghost"), PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Account, _)));

    let err = accounts
        .login(&alice.display_name, "wrong password")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidPassword, _)
    ));
    Ok(())
}

#[tokio::test]
async fn set_password_replaces_the_credential() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let accounts = AccountService::new(&env.state);
    let alice = register(&env.state, "alice").await?;

    accounts.set_password(alice.id, "a brand new secret").await?;

    assert!(accounts.login(&alice.display_name, PASSWORD).await.is_err());
    let (account, _) = accounts
        .login(&alice.display_name, "a brand new secret")
        .await?;
    assert_eq!(account.id, alice.id);

    let err = accounts
        .set_password(alice.id + 500, "a brand new secret")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Account, _)));

    let err = accounts.set_password(alice.id, "tiny").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PasswordTooShort, _)
    ));
    Ok(())
}

#[tokio::test]
async fn lookup_contact_finds_by_exact_name() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let accounts = AccountService::new(&env.state);
    let alice = register(&env.state, "alice").await?;

    let found = accounts.lookup_contact(&alice.display_name).await?;
    assert_eq!(found, alice);

    let err = accounts
        .lookup_contact(&unique_display_name("nobody"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(accounts.find_account(alice.id).await?, alice);
    Ok(())
}
