//! Structural invariants of a session.
//!
//! Checked after every engine mutation; a violation is a defect in
//! whoever built or stored the session, never a player mistake.

use crate::{MoveError, MoveErrorKind, Session, Status};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Returns the descriptions of every violated invariant.
    fn violations(state: &S) -> Vec<&'static str>;

    /// Converts any violation into an `InvariantViolation` error.
    fn check_all(state: &S) -> Result<(), MoveError> {
        let violations = Self::violations(state);
        if violations.is_empty() {
            return Ok(());
        }
        warn!(?violations, "Session invariants violated");
        Err(MoveError::new(MoveErrorKind::InvariantViolation(
            violations.join("; "),
        )))
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn violations(state: &S) -> Vec<&'static str> {
        [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| description)
        .collect()
    }
}

/// Owned fields carry at least one owner point, unowned fields none.
pub struct OwnerPointsConsistent;

impl Invariant<Session> for OwnerPointsConsistent {
    fn holds(session: &Session) -> bool {
        session.board.iter().all(|field| match field.owner() {
            Some(_) => field.owner_points() >= 1,
            None => field.owner_points() == 0,
        })
    }

    fn description() -> &'static str {
        "Owner points must be positive exactly on owned fields"
    }
}

/// A winner exists exactly when the session is completed.
pub struct WinnerMatchesStatus;

impl Invariant<Session> for WinnerMatchesStatus {
    fn holds(session: &Session) -> bool {
        session.winner.is_some() == (session.status == Status::Completed)
    }

    fn description() -> &'static str {
        "Winner must be set if and only if the session is completed"
    }
}

/// Every captured field is repriced from its base cost and income.
pub struct CapturedFieldsRepriced;

impl Invariant<Session> for CapturedFieldsRepriced {
    fn holds(session: &Session) -> bool {
        session
            .board
            .iter()
            .filter(|field| !field.takeover_history().is_empty())
            .all(|field| field.cost() == field.base_cost() * field.income() + 1)
    }

    fn description() -> &'static str {
        "Captured fields must cost base_cost * income + 1"
    }
}

/// All invariants the engine checks after a mutation.
pub type SessionInvariants = (
    OwnerPointsConsistent,
    WinnerMatchesStatus,
    CapturedFieldsRepriced,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Winner;

    #[test]
    fn test_fresh_session_satisfies_all() {
        let session = Session::new("fresh".to_string());
        assert!(SessionInvariants::violations(&session).is_empty());
    }

    #[test]
    fn test_winner_without_completion_is_reported() {
        let mut session = Session::new("broken".to_string());
        session.winner = Some(Winner::Draw);
        let err = SessionInvariants::check_all(&session).unwrap_err();
        assert!(err.is_defect());
    }
}
