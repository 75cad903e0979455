//! Move rejection errors.

use crate::{Role, Status};
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move or end-turn request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveErrorKind {
    /// The acting player does not hold the current turn.
    #[display("Not your turn, waiting for {}", _0)]
    NotYourTurn(Role),

    /// Coordinates fall outside the board.
    #[display("Invalid field coordinates ({}, {})", x, y)]
    CoordinateRange {
        /// Requested row.
        x: i64,
        /// Requested column.
        y: i64,
    },

    /// Target is not adjacent to any field owned by the acting player.
    #[display("Field ({}, {}) is out of range", x, y)]
    OutOfRange {
        /// Requested row.
        x: usize,
        /// Requested column.
        y: usize,
    },

    /// Acting player already owns the target.
    #[display("This player already owns this field")]
    AlreadyOwned,

    /// Target is locked until the given round.
    #[display("This field is currently blocked until round {}", _0)]
    Blocked(u32),

    /// Balance is lower than the field's cost.
    #[display("Not enough points to takeover this field (cost {}, available {})", required, available)]
    InsufficientPoints {
        /// Current cost of the field.
        required: u32,
        /// Acting player's balance.
        available: u32,
    },

    /// Session does not accept moves in its current status.
    #[display("Session is not active ({})", _0)]
    GameNotActive(Status),

    /// Internal state is inconsistent; a bug in whoever built the session.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

/// Move rejection with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Move rejected: {} at {}:{}", kind, file, line)]
pub struct MoveError {
    /// Rejection reason.
    pub kind: MoveErrorKind,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl MoveError {
    /// Creates a new move error at the caller's location.
    #[track_caller]
    #[instrument(skip(kind), fields(kind = %kind))]
    pub fn new(kind: MoveErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the rejection reason.
    pub fn kind(&self) -> &MoveErrorKind {
        &self.kind
    }

    /// True when the error signals corrupted state rather than a bad request.
    pub fn is_defect(&self) -> bool {
        matches!(self.kind, MoveErrorKind::InvariantViolation(_))
    }
}

impl From<MoveErrorKind> for MoveError {
    #[track_caller]
    fn from(kind: MoveErrorKind) -> Self {
        Self::new(kind)
    }
}
