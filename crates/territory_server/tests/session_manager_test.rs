//! Tests for the session manager and player directory.

use territory::{GameEngine, MoveErrorKind, Role, Rules, Status, TurnOutcome, Winner};
use territory_server::{Player, PlayerDirectory, ServiceError, SessionId, SessionManager};

fn manager_with(rules: Rules) -> SessionManager {
    let engine = GameEngine::new(rules).expect("Valid rules");
    SessionManager::new(engine, PlayerDirectory::new(), 16)
}

async fn started_match(manager: &SessionManager) -> (SessionId, Player, Player) {
    let alice = manager
        .players()
        .register("Alice".to_string())
        .await
        .expect("Register");
    let bob = manager
        .players()
        .register("Bob".to_string())
        .await
        .expect("Register");
    let id = manager.create_session("Test Session".to_string()).await;
    manager.join(&id, alice.token()).await.expect("Join");
    manager.join(&id, bob.token()).await.expect("Join");
    (id, alice, bob)
}

#[tokio::test]
async fn test_register_and_resolve() {
    let players = PlayerDirectory::new();
    assert!(players.is_empty().await);

    let alice = players.register("  Alice ".to_string()).await.expect("Register");
    assert_eq!(alice.name(), "Alice");
    assert_eq!(players.resolve(alice.token()).await.expect("Resolve"), alice);
    assert_eq!(players.len().await, 1);

    assert!(matches!(
        players.resolve("bogus").await,
        Err(ServiceError::PlayerNotFound)
    ));
    assert!(matches!(
        players.register("   ".to_string()).await,
        Err(ServiceError::InvalidPlayerName)
    ));
}

#[tokio::test]
async fn test_join_activates_session() {
    let manager = manager_with(Rules::default());
    let (id, alice, _bob) = started_match(&manager).await;

    let session = manager.get_session(&id).await.expect("Session exists");
    assert_eq!(session.status, Status::Active);
    assert_eq!(session.player_turn, Role::PlayerA);
    assert_eq!(session.player_a.as_ref(), Some(alice.id()));
    assert_eq!(session.action_points.balance(Role::PlayerA), 3);

    let summaries = manager.list_sessions().await;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, id);
    assert_eq!(summaries[0].status, Status::Active);
}

#[tokio::test]
async fn test_full_session_rejects_third_player() {
    let manager = manager_with(Rules::default());
    let (id, _alice, _bob) = started_match(&manager).await;
    let carol = manager
        .players()
        .register("Carol".to_string())
        .await
        .expect("Register");

    let err = manager.join(&id, carol.token()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Join(_)));
}

#[tokio::test]
async fn test_unknown_session_and_outsider() {
    let manager = manager_with(Rules::default());
    let (id, _alice, _bob) = started_match(&manager).await;

    let err = manager.get_session("missing").await.unwrap_err();
    assert!(matches!(err, ServiceError::SessionNotFound(ref s) if s == "missing"));

    let outsider = manager
        .players()
        .register("Mallory".to_string())
        .await
        .expect("Register");
    let err = manager
        .make_move(&id, outsider.token(), 0, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotInSession));

    let err = manager.end_turn(&id, "not-a-token").await.unwrap_err();
    assert!(matches!(err, ServiceError::PlayerNotFound));
}

#[tokio::test]
async fn test_scripted_match_and_auto_turn_end() {
    let manager = manager_with(Rules::default());
    let (id, alice, bob) = started_match(&manager).await;

    let (session, outcome) = manager
        .make_move(&id, alice.token(), 0, 1)
        .await
        .expect("Move");
    assert_eq!(outcome, TurnOutcome::Continues);
    assert_eq!(session.action_points.balance(Role::PlayerA), 2);

    manager
        .make_move(&id, alice.token(), 0, 2)
        .await
        .expect("Move");
    let (session, outcome) = manager
        .make_move(&id, alice.token(), 0, 3)
        .await
        .expect("Move");
    assert_eq!(
        outcome,
        TurnOutcome::Passed {
            next: Role::PlayerB,
            round: 2
        }
    );
    assert_eq!(session.player_turn, Role::PlayerB);

    let err = manager
        .make_move(&id, alice.token(), 0, 4)
        .await
        .unwrap_err();
    match err {
        ServiceError::Move(e) => assert_eq!(e.kind(), &MoveErrorKind::NotYourTurn(Role::PlayerB)),
        other => panic!("Unexpected error: {other}"),
    }

    manager.end_turn(&id, bob.token()).await.expect("End turn");
    let session = manager.get_session(&id).await.expect("Session exists");
    assert_eq!(session.player_turn, Role::PlayerA);
    assert_eq!(session.current_round, 3);
}

#[tokio::test]
async fn test_rejected_move_is_not_committed_or_published() {
    let manager = manager_with(Rules::default());
    let (id, alice, _bob) = started_match(&manager).await;
    let mut updates = manager.subscribe(&id).await.expect("Subscribe");
    let before = manager.get_session(&id).await.expect("Session exists");

    let err = manager
        .make_move(&id, alice.token(), 4, 4)
        .await
        .unwrap_err();
    assert!(err.is_rejection());

    assert_eq!(manager.get_session(&id).await.expect("Session exists"), before);
    assert!(updates.try_recv().is_err());
}

#[tokio::test]
async fn test_committed_changes_are_broadcast() {
    let manager = manager_with(Rules::default());
    let (id, alice, _bob) = started_match(&manager).await;
    let mut updates = manager.subscribe(&id).await.expect("Subscribe");

    manager
        .make_move(&id, alice.token(), 1, 1)
        .await
        .expect("Move");

    let update = updates.recv().await.expect("Update published");
    assert_eq!(update.session_id, id);
    assert_eq!(update.session.action_points.balance(Role::PlayerA), 2);
    let json = serde_json::to_value(&update).expect("Serializes");
    assert_eq!(json["session"]["status"], "active");
}

#[tokio::test]
async fn test_completed_match_rejects_moves() {
    let manager = manager_with(Rules::new(1, 3, 3, 4, 2));
    let (id, alice, bob) = started_match(&manager).await;

    manager.end_turn(&id, alice.token()).await.expect("End turn");
    let (session, outcome) = manager.end_turn(&id, bob.token()).await.expect("End turn");
    assert_eq!(outcome, TurnOutcome::Completed(Winner::Draw));
    assert_eq!(session.status, Status::Completed);

    let err = manager.end_turn(&id, bob.token()).await.unwrap_err();
    match err {
        ServiceError::Move(e) => {
            assert_eq!(e.kind(), &MoveErrorKind::GameNotActive(Status::Completed))
        }
        other => panic!("Unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_serialized() {
    let manager = manager_with(Rules::default());
    let (id, alice, _bob) = started_match(&manager).await;

    // Eight simultaneous captures of cells next to (0, 0); only three can be
    // paid for before the turn passes to player B.
    let targets = [(0, 1), (1, 0), (1, 1), (0, 1), (1, 0), (1, 1), (0, 1), (1, 1)];
    let mut handles = Vec::new();
    for (x, y) in targets {
        let manager = manager.clone();
        let id = id.clone();
        let token = alice.token().clone();
        handles.push(tokio::spawn(async move {
            manager.make_move(&id, &token, x, y).await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.expect("Task completes").is_ok() {
            accepted += 1;
        }
    }

    let session = manager.get_session(&id).await.expect("Session exists");
    assert_eq!(accepted, 3);
    assert_eq!(session.player_turn, Role::PlayerB);
    assert_eq!(session.current_round, 2);
    assert_eq!(session.board.score(Role::PlayerA), 8);
}
