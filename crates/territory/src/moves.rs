//! Move application and voluntary end of turn.

use crate::invariants::{InvariantSet, SessionInvariants};
use crate::round::{advance_turn, ensure_turn};
use crate::{Coord, MoveError, MoveErrorKind, Role, Rules, Session, Status, TurnOutcome};
use tracing::{info, instrument, warn};

fn ensure_active(session: &Session) -> Result<(), MoveError> {
    if session.status != Status::Active {
        warn!(status = %session.status, "Session is not active");
        return Err(MoveError::new(MoveErrorKind::GameNotActive(session.status)));
    }
    Ok(())
}

/// Captures the field at `(x, y)` for `role`.
///
/// The target must lie on the board and touch (including diagonally) a
/// field `role` already owns. If the capture leaves `role` with no action
/// points the turn ends in the same call.
///
/// # Errors
///
/// Returns the first failed check: `GameNotActive`, `NotYourTurn`,
/// `CoordinateRange`, `OutOfRange`, then the capture errors of
/// [`crate::Field::attempt_capture`].
#[instrument(skip(session, rules), fields(round = session.current_round))]
pub fn apply_move(
    session: &mut Session,
    role: Role,
    x: i64,
    y: i64,
    rules: &Rules,
) -> Result<TurnOutcome, MoveError> {
    ensure_active(session)?;
    ensure_turn(session, role)?;

    let coord = Coord::try_new(x, y).ok_or_else(|| {
        warn!("Coordinates outside the board");
        MoveError::new(MoveErrorKind::CoordinateRange { x, y })
    })?;

    if !session.board.is_adjacent_to_owned(coord, role) {
        warn!(%coord, "Target not adjacent to owned territory");
        return Err(MoveError::new(MoveErrorKind::OutOfRange {
            x: coord.x(),
            y: coord.y(),
        }));
    }

    let round = session.current_round;
    session
        .board
        .get_mut(coord)
        .attempt_capture(&mut session.action_points, role, round, rules)?;
    info!(
        %coord,
        remaining = session.action_points.balance(role),
        "Field captured"
    );

    let outcome = if session.action_points.is_exhausted(role) {
        advance_turn(session, role, rules)?
    } else {
        TurnOutcome::Continues
    };

    SessionInvariants::check_all(session)?;
    Ok(outcome)
}

/// Ends `role`'s turn without capturing anything.
///
/// # Errors
///
/// `GameNotActive` or `NotYourTurn`, plus any invariant fault from the
/// transition.
#[instrument(skip(session, rules), fields(round = session.current_round))]
pub fn end_turn(session: &mut Session, role: Role, rules: &Rules) -> Result<TurnOutcome, MoveError> {
    ensure_active(session)?;
    ensure_turn(session, role)?;

    let outcome = advance_turn(session, role, rules)?;
    SessionInvariants::check_all(session)?;
    Ok(outcome)
}
