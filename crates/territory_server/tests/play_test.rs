//! Tests for the scripted hot-seat loop.

use territory::{GameEngine, Role, Rules, Status, Winner};
use territory_server::{PlayerDirectory, SessionManager, play};

fn manager_with(rules: Rules) -> SessionManager {
    let engine = GameEngine::new(rules).expect("Valid rules");
    SessionManager::new(engine, PlayerDirectory::new(), 16)
}

async fn run(manager: &SessionManager, script: &str) -> (territory::Session, String) {
    let mut output = Vec::new();
    let session = play::run_hotseat(
        manager,
        "Alice".to_string(),
        "Bob".to_string(),
        script.as_bytes(),
        &mut output,
    )
    .await
    .expect("Match runs");
    (session, String::from_utf8(output).expect("UTF-8 output"))
}

#[tokio::test]
async fn test_scripted_turn_passes() {
    let manager = manager_with(Rules::default());
    let (session, output) = run(&manager, "0 1\n0 2\n0 3\n").await;

    assert_eq!(session.player_turn, Role::PlayerB);
    assert_eq!(session.current_round, 2);
    assert!(output.contains("Turn passes to player_b (round 2)"));
    assert_eq!(manager.list_sessions().await.len(), 1);
}

#[tokio::test]
async fn test_rejections_are_reported_and_play_continues() {
    let manager = manager_with(Rules::default());
    let (session, output) = run(&manager, "4 4\nhello\n9 9\n1 1\nquit\n0 1\n").await;

    assert!(output.contains("Rejected: Field (4, 4) is out of range"));
    assert!(output.contains("Rejected: Invalid field coordinates (9, 9)"));
    assert!(output.contains("Unrecognized command"));
    // Quit stops before the last capture.
    assert_eq!(session.action_points.balance(Role::PlayerA), 2);
    assert_eq!(session.status, Status::Active);
}

#[tokio::test]
async fn test_match_runs_to_completion() {
    let manager = manager_with(Rules::new(2, 3, 3, 4, 2));
    let (session, output) = run(&manager, "1 1\nend\nend\nend\nend\n").await;

    assert_eq!(session.status, Status::Completed);
    assert_eq!(session.winner, Some(Winner::PlayerA));
    assert!(output.contains("Game over: player_a"));
}

#[tokio::test]
async fn test_update_listener_released_after_match() {
    let manager = manager_with(Rules::default());
    let (_, _) = run(&manager, "0 1\nquit\n").await;

    let summaries = manager.list_sessions().await;
    let id = &summaries[0].id;
    assert_eq!(manager.subscriber_count(id).await.expect("Session exists"), 0);
}
