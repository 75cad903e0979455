//! Engine facade bundling the rules with the session operations.

use crate::{
    Action, JoinError, MoveError, PlayerId, Role, Rules, RulesError, Session, TurnOutcome, moves,
    round,
};
use tracing::{debug, instrument};

/// Applies player intents to sessions under one rule set.
///
/// The engine is synchronous and holds no session state; callers must
/// ensure at most one mutation per session is in flight.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    rules: Rules,
}

impl GameEngine {
    /// Creates an engine after validating the rules.
    #[instrument]
    pub fn new(rules: Rules) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// Rules in force.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Creates a fresh session waiting for players.
    pub fn new_session(&self, name: String) -> Session {
        Session::new(name)
    }

    /// Seats a player in a waiting session.
    pub fn join(&self, session: &mut Session, player: PlayerId) -> Result<Role, JoinError> {
        session.join(player, &self.rules)
    }

    /// Dispatches an [`Action`] on behalf of `role`.
    #[instrument(skip(self, session), fields(session = %session.name))]
    pub fn apply(
        &self,
        session: &mut Session,
        role: Role,
        action: Action,
    ) -> Result<TurnOutcome, MoveError> {
        debug!(%action, "Applying action");
        match action {
            Action::Capture { x, y } => self.apply_move(session, role, x, y),
            Action::EndTurn => self.end_turn(session, role),
        }
    }

    /// Captures the field at `(x, y)`; see [`crate::apply_move`].
    pub fn apply_move(
        &self,
        session: &mut Session,
        role: Role,
        x: i64,
        y: i64,
    ) -> Result<TurnOutcome, MoveError> {
        moves::apply_move(session, role, x, y, &self.rules)
    }

    /// Ends the turn voluntarily; see [`crate::end_turn`].
    pub fn end_turn(&self, session: &mut Session, role: Role) -> Result<TurnOutcome, MoveError> {
        moves::end_turn(session, role, &self.rules)
    }

    /// Runs the raw round/turn transition; see [`crate::advance_turn`].
    pub fn advance_turn(&self, session: &mut Session, role: Role) -> Result<TurnOutcome, MoveError> {
        round::advance_turn(session, role, &self.rules)
    }
}
