//! Tests for round/turn transitions and game completion.

use territory::{
    Coord, GameEngine, MoveErrorKind, Role, Rules, Session, Status, TurnOutcome, Winner,
};

fn active_session(engine: &GameEngine) -> Session {
    let mut session = engine.new_session("turns".to_string());
    engine.join(&mut session, "alice".to_string()).expect("Join");
    engine.join(&mut session, "bob".to_string()).expect("Join");
    session
}

fn owner_points(session: &Session, x: i64, y: i64) -> u32 {
    let coord = Coord::try_new(x, y).expect("On board");
    session.board.get(coord).owner_points()
}

#[test]
fn test_end_turn_out_of_turn_rejected() {
    let engine = GameEngine::default();
    let mut session = active_session(&engine);
    let before = session.clone();

    let err = engine.end_turn(&mut session, Role::PlayerB).unwrap_err();
    assert_eq!(err.kind(), &MoveErrorKind::NotYourTurn(Role::PlayerA));
    assert_eq!(session, before);
}

#[test]
fn test_end_turn_grants_ending_player_and_scales() {
    let engine = GameEngine::default();
    let mut session = active_session(&engine);

    let outcome = engine.end_turn(&mut session, Role::PlayerA).expect("End turn");

    assert_eq!(
        outcome,
        TurnOutcome::Passed {
            next: Role::PlayerB,
            round: 2
        }
    );
    // The grant goes to the player ending the turn.
    assert_eq!(session.action_points.balance(Role::PlayerA), 6);
    assert_eq!(session.action_points.balance(Role::PlayerB), 3);
    // Scores are taken before this round's income is added.
    assert_eq!((session.points_a, session.points_b), (1, 1));
    assert_eq!(owner_points(&session, 0, 0), 2);
    assert_eq!(owner_points(&session, 8, 8), 2);
    assert_eq!(session.player_turn, Role::PlayerB);
}

#[test]
fn test_completion_with_equal_scores_is_draw() {
    let engine = GameEngine::new(Rules::new(1, 3, 3, 4, 2)).expect("Valid rules");
    let mut session = active_session(&engine);

    engine.end_turn(&mut session, Role::PlayerA).expect("End turn");
    assert_eq!(session.current_round, 2);

    let outcome = engine.end_turn(&mut session, Role::PlayerB).expect("End turn");

    assert_eq!(outcome, TurnOutcome::Completed(Winner::Draw));
    assert_eq!(session.status, Status::Completed);
    assert_eq!(session.winner, Some(Winner::Draw));
    assert_eq!((session.points_a, session.points_b), (2, 2));
    // No flip, no round increment, no scaling on the completing call.
    assert_eq!(session.player_turn, Role::PlayerB);
    assert_eq!(session.current_round, 2);
    assert_eq!(owner_points(&session, 0, 0), 2);
    assert_eq!(owner_points(&session, 8, 8), 2);
}

#[test]
fn test_completion_picks_higher_score() {
    let engine = GameEngine::new(Rules::new(1, 3, 3, 4, 2)).expect("Valid rules");
    let mut session = active_session(&engine);

    engine
        .apply_move(&mut session, Role::PlayerA, 0, 1)
        .expect("Capture");
    engine.end_turn(&mut session, Role::PlayerA).expect("End turn");
    let outcome = engine.end_turn(&mut session, Role::PlayerB).expect("End turn");

    assert_eq!(outcome, TurnOutcome::Completed(Winner::PlayerA));
    assert_eq!((session.points_a, session.points_b), (4, 2));
}

#[test]
fn test_completed_session_rejects_further_actions() {
    let engine = GameEngine::new(Rules::new(1, 3, 3, 4, 2)).expect("Valid rules");
    let mut session = active_session(&engine);
    engine.end_turn(&mut session, Role::PlayerA).expect("End turn");
    engine.end_turn(&mut session, Role::PlayerB).expect("End turn");
    let finished = session.clone();

    let err = engine.end_turn(&mut session, Role::PlayerB).unwrap_err();
    assert_eq!(err.kind(), &MoveErrorKind::GameNotActive(Status::Completed));

    let err = engine
        .apply_move(&mut session, Role::PlayerB, 7, 7)
        .unwrap_err();
    assert_eq!(err.kind(), &MoveErrorKind::GameNotActive(Status::Completed));

    assert_eq!(session, finished);
    assert_eq!(session.winner, Some(Winner::Draw));
}

#[test]
fn test_rounds_alternate_between_players() {
    let engine = GameEngine::default();
    let mut session = active_session(&engine);

    for expected_round in 2..=6 {
        let role = session.player_turn;
        engine.end_turn(&mut session, role).expect("End turn");
        assert_eq!(session.current_round, expected_round);
        assert_eq!(session.player_turn, role.opponent());
    }
}

#[test]
fn test_advance_turn_reports_corrupt_state() {
    let engine = GameEngine::default();
    let mut session = active_session(&engine);
    let json = serde_json::to_string(&session).expect("Serializes");
    // Owned field with zero owner points cannot be scaled.
    let corrupt = json.replacen(r#""ownerPoints":1"#, r#""ownerPoints":0"#, 1);
    let mut session: Session = serde_json::from_str(&corrupt).expect("Deserializes");

    let err = engine.advance_turn(&mut session, Role::PlayerA).unwrap_err();
    assert!(err.is_defect());
}

#[test]
fn test_round_counter_overflow_is_defect() {
    let engine = GameEngine::default();
    let mut session = active_session(&engine);
    session.current_round = u32::MAX;
    let rules = Rules::new(u32::MAX, 3, 3, 4, 2);

    let err = territory::advance_turn(&mut session, Role::PlayerA, &rules).unwrap_err();
    assert!(err.is_defect());
    assert_eq!(session.current_round, u32::MAX);
}
