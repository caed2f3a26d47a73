use backend_test_support::unique_helpers::unique_display_name;
use scrawl::protocol::message::{NewGameMessage, TurnMessage, UserMessage};
use scrawl::{Api, AppError};

use crate::support::{build_test_env, sample_drawing, PASSWORD};

async fn sign_up(api: &Api, prefix: &str) -> Result<(i64, String), AppError> {
    let name = unique_display_name(prefix);
    let credentials = UserMessage {
        display_name: Some(name.clone()),
        password: Some(PASSWORD.into()),
        ..UserMessage::default()
    };

    let registered = api.register(credentials.clone()).await;
    assert!(registered.errors.is_none(), "register failed: {registered:?}");

    let logged_in = api.login(credentials).await;
    let token = logged_in
        .meta
        .and_then(|m| m.auth)
        .expect("login returns a token");
    let user = logged_in.user.expect("login returns the user");
    assert_eq!(user.display_name.as_deref(), Some(name.as_str()));
    assert!(user.password.is_none());

    let id = api.resolve_session(&token).await?;
    assert_eq!(Some(id), user.id);
    Ok((id, name))
}

#[tokio::test]
async fn a_game_played_through_the_boundary() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let api = Api::new(&env.state);
    let (creator, creator_name) = sign_up(&api, "creator").await?;
    let (alice, _) = sign_up(&api, "alice").await?;
    let (bob, bob_name) = sign_up(&api, "bob").await?;

    let contact = api.lookup_contact(&bob_name).await;
    assert_eq!(contact.user.and_then(|u| u.id), Some(bob));

    let started = api
        .start_game(
            creator,
            NewGameMessage {
                label: "a lighthouse".into(),
                players: vec![alice, bob],
            },
        )
        .await;
    let game_id = started.game.expect("started game").game_id;

    let inbox = api.list_inbox(alice).await;
    let entries = inbox.inbox_entries.expect("entries");
    assert_eq!(entries.len(), 1);
    let previous = entries[0].previous_turn.clone().expect("opening label");
    assert_eq!(previous.label, "a lighthouse");
    assert!(!previous.is_drawing);

    let reply = api
        .submit_turn(
            alice,
            game_id,
            TurnMessage {
                is_drawing: true,
                drawing: Some(sample_drawing()),
                ..TurnMessage::default()
            },
        )
        .await;
    assert!(reply.errors.is_none(), "drawing rejected: {reply:?}");

    let entry = api.inbox_entry(bob, game_id).await;
    let previous = entry
        .inbox_entry
        .and_then(|e| e.previous_turn)
        .expect("alice's drawing");
    assert!(previous.is_drawing);
    assert_eq!(previous.drawing, Some(sample_drawing()));

    let reply = api
        .submit_turn(
            bob,
            game_id,
            TurnMessage {
                label: "a candle".into(),
                ..TurnMessage::default()
            },
        )
        .await;
    assert!(reply.errors.is_none(), "label rejected: {reply:?}");

    let history = api.game_history(alice, 0).await;
    let games = history.games.as_ref().expect("games");
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].game_id, game_id);
    assert!(games[0].completed_at_id.is_some());
    let players: Vec<Option<String>> = games[0].turns.iter().map(|t| t.player.clone()).collect();
    assert_eq!(players[0].as_deref(), Some(creator_name.as_str()));
    assert_eq!(games[0].turns[2].label, "a candle");

    let single = api.game(creator, game_id).await;
    assert_eq!(single.game.map(|g| g.turns.len()), Some(3));

    let wire = serde_json::to_value(&history).expect("serializes");
    assert!(wire["games"][0]["completed_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn password_change_and_minted_sessions() -> Result<(), AppError> {
    let env = build_test_env().await?;
    let api = Api::new(&env.state);
    let (alice, name) = sign_up(&api, "alice").await?;

    let reply = api
        .update_password(
            alice,
            UserMessage {
                password: Some("short".into()),
                ..UserMessage::default()
            },
        )
        .await;
    let user_errors = reply.errors.and_then(|e| e.user).expect("user errors");
    assert_eq!(
        user_errors.password,
        vec!["Password must be at least 8 characters."]
    );

    let reply = api
        .update_password(
            alice,
            UserMessage {
                password: Some("correct horse battery".into()),
                ..UserMessage::default()
            },
        )
        .await;
    assert!(reply.errors.is_none());

    let reply = api
        .login(UserMessage {
            display_name: Some(name),
            password: Some("correct horse battery".into()),
            ..UserMessage::default()
        })
        .await;
    assert!(reply.meta.and_then(|m| m.auth).is_some());

    let minted = api.mint_session(alice).await;
    let token = minted.meta.and_then(|m| m.auth).expect("token");
    assert_eq!(api.resolve_session(&token).await?, alice);
    Ok(())
}
