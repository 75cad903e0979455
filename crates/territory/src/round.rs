//! Round and turn transitions.

use crate::{MoveError, MoveErrorKind, Role, Rules, Session, Status, TurnOutcome, Winner};
use tracing::{debug, info, instrument, warn};

/// Fails with `NotYourTurn` unless `role` holds the turn.
pub(crate) fn ensure_turn(session: &Session, role: Role) -> Result<(), MoveError> {
    if session.player_turn != role {
        warn!(
            acting = %role,
            expected = %session.player_turn,
            "Player tried to act out of turn"
        );
        return Err(MoveError::new(MoveErrorKind::NotYourTurn(
            session.player_turn,
        )));
    }
    Ok(())
}

/// Recomputes both stored scores from the board.
pub fn recompute_scores(session: &mut Session) {
    session.points_a = session.board.score(Role::PlayerA);
    session.points_b = session.board.score(Role::PlayerB);
    debug!(
        points_a = session.points_a,
        points_b = session.points_b,
        "Scores recomputed"
    );
}

/// Ends `role`'s turn.
///
/// The ending player receives the per-round grant and scores are
/// recomputed. Past the round limit the session completes and nothing
/// else changes; otherwise the turn flips, the round counter advances and
/// every owned field earns its income.
///
/// # Errors
///
/// `NotYourTurn` if `role` does not hold the turn, `InvariantViolation`
/// if an owned field cannot be scaled or the round counter overflows.
#[instrument(skip(session, rules), fields(round = session.current_round))]
pub fn advance_turn(
    session: &mut Session,
    role: Role,
    rules: &Rules,
) -> Result<TurnOutcome, MoveError> {
    ensure_turn(session, role)?;

    session
        .action_points
        .grant(role, *rules.action_points_per_round());
    recompute_scores(session);

    if session.current_round > *rules.rounds() {
        let winner = Winner::from_scores(session.points_a, session.points_b);
        session.status = Status::Completed;
        session.winner = Some(winner);
        info!(
            winner = %winner,
            points_a = session.points_a,
            points_b = session.points_b,
            "Session completed"
        );
        return Ok(TurnOutcome::Completed(winner));
    }

    session.current_round = session.current_round.checked_add(1).ok_or_else(|| {
        MoveError::new(MoveErrorKind::InvariantViolation(
            "Round counter overflows".to_string(),
        ))
    })?;
    session.player_turn = role.opponent();
    session.board.scale_owned_fields()?;

    info!(
        next = %session.player_turn,
        round = session.current_round,
        "Turn passed"
    );
    Ok(TurnOutcome::Passed {
        next: session.player_turn,
        round: session.current_round,
    })
}
