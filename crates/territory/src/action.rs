//! Player intents and the outcome of applying them.

use crate::{Role, Winner};
use serde::{Deserialize, Serialize};

/// Something a player asks the engine to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Capture the field at `(x, y)`; coordinates are validated by the engine.
    Capture {
        /// Row.
        x: i64,
        /// Column.
        y: i64,
    },
    /// Hand the turn over voluntarily.
    EndTurn,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Capture { x, y } => write!(f, "capture ({x}, {y})"),
            Action::EndTurn => write!(f, "end turn"),
        }
    }
}

/// What happened to the turn order after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The acting player keeps the turn.
    Continues,
    /// The turn moved on.
    Passed {
        /// Seat now holding the turn.
        next: Role,
        /// Round counter after the transition.
        round: u32,
    },
    /// The round limit was exceeded and the result is final.
    Completed(Winner),
}
