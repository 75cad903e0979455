//! Service-level errors.

use derive_more::{Display, Error, From};
use territory::{JoinError, MoveError};

use crate::SessionId;

/// Why a service request failed.
#[derive(Debug, Display, Error, From)]
pub enum ServiceError {
    /// No session with this id.
    #[display("Session not found: {}", _0)]
    SessionNotFound(#[error(not(source))] SessionId),

    /// Token does not belong to a registered player.
    #[display("Player not found")]
    PlayerNotFound,

    /// Player exists but holds no seat in the session.
    #[display("Player not part of this session")]
    NotInSession,

    /// Player names must not be blank.
    #[display("Name is required")]
    InvalidPlayerName,

    /// Seating the player failed.
    #[display("{}", _0)]
    #[from]
    Join(JoinError),

    /// The engine rejected the action.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),
}

impl ServiceError {
    /// True if the caller can fix the request and try again.
    pub fn is_rejection(&self) -> bool {
        match self {
            ServiceError::Move(e) => !e.is_defect(),
            _ => true,
        }
    }
}
