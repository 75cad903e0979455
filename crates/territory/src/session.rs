//! Match state handed to and returned by the engine.

use crate::{ActionPoints, Board, PlayerId, Role, Rules, Status, Winner};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Complete state of one match.
///
/// Serializes to the shape observers consume: `player_a`, `player_b`,
/// `action_points_a`, `action_points_b`, `points_a`, `points_b`, `board`,
/// `playerTurn`, `currentRound`, `status` and `winner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name chosen at creation.
    pub name: String,
    /// Player holding seat A.
    pub player_a: Option<PlayerId>,
    /// Player holding seat B.
    pub player_b: Option<PlayerId>,
    /// Spendable balances of both seats.
    #[serde(flatten)]
    pub action_points: ActionPoints,
    /// Score of seat A as of the last turn boundary.
    pub points_a: u32,
    /// Score of seat B as of the last turn boundary.
    pub points_b: u32,
    /// The grid.
    pub board: Board,
    /// Seat allowed to act.
    #[serde(rename = "playerTurn")]
    pub player_turn: Role,
    /// Round counter, starts at 1.
    #[serde(rename = "currentRound")]
    pub current_round: u32,
    /// Lifecycle state.
    pub status: Status,
    /// Set once the session is completed.
    pub winner: Option<Winner>,
}

impl Session {
    /// Creates a session waiting for players, with the seeded board.
    #[instrument]
    pub fn new(name: String) -> Self {
        info!(name = %name, "Creating new session");
        Self {
            name,
            player_a: None,
            player_b: None,
            action_points: ActionPoints::default(),
            points_a: 0,
            points_b: 0,
            board: Board::seeded(),
            player_turn: Role::PlayerA,
            current_round: 1,
            status: Status::Waiting,
            winner: None,
        }
    }

    /// Resolves which seat a player holds.
    pub fn role_of(&self, player: &str) -> Option<Role> {
        if self.player_a.as_deref() == Some(player) {
            Some(Role::PlayerA)
        } else if self.player_b.as_deref() == Some(player) {
            Some(Role::PlayerB)
        } else {
            None
        }
    }

    /// Player id holding a seat.
    pub fn player(&self, role: Role) -> Option<&PlayerId> {
        match role {
            Role::PlayerA => self.player_a.as_ref(),
            Role::PlayerB => self.player_b.as_ref(),
        }
    }

    /// Stored score of a seat.
    pub fn points(&self, role: Role) -> u32 {
        match role {
            Role::PlayerA => self.points_a,
            Role::PlayerB => self.points_b,
        }
    }

    /// Seats a player, filling A before B.
    ///
    /// The second join activates the session: player A gets the turn and
    /// both balances are set to the per-round grant.
    ///
    /// # Errors
    ///
    /// Returns [`JoinError`] if the session is not waiting, the player is
    /// already seated, or both seats are taken.
    #[instrument(skip(self, rules), fields(session = %self.name))]
    pub fn join(&mut self, player: PlayerId, rules: &Rules) -> Result<Role, JoinError> {
        if self.status != Status::Waiting {
            warn!(status = %self.status, "Session is not available to join");
            return Err(JoinError::NotJoinable(self.status));
        }
        if self.role_of(&player).is_some() {
            warn!(player = %player, "Player already in session");
            return Err(JoinError::AlreadyJoined);
        }

        let role = if self.player_a.is_none() {
            self.player_a = Some(player);
            Role::PlayerA
        } else if self.player_b.is_none() {
            self.player_b = Some(player);
            Role::PlayerB
        } else {
            warn!("Waiting session has both seats taken");
            return Err(JoinError::SessionFull);
        };
        info!(role = %role, "Player seated");

        if self.player_a.is_some() && self.player_b.is_some() {
            self.status = Status::Active;
            self.player_turn = Role::PlayerA;
            self.action_points.reset(*rules.action_points_per_round());
            info!("Both seats filled, session active");
        }

        Ok(role)
    }
}

/// Why a player could not be seated.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum JoinError {
    /// Only waiting sessions accept players.
    #[display("Session is not available to join ({})", _0)]
    NotJoinable(#[error(not(source))] Status),
    /// Both seats are taken on a session that is still waiting.
    ///
    /// Joining through the engine activates a session as soon as the
    /// second seat fills, so this only fires for sessions built or
    /// deserialized with both seats set and status `Waiting`.
    #[display("Session is already full")]
    SessionFull,
    /// The player already holds a seat.
    #[display("Player already in session")]
    AlreadyJoined,
}
