//! Territory - a two-player territory-capture game engine.
//!
//! Players alternately spend action points to capture fields adjacent to
//! their holdings on a 9×9 board. Owned fields earn score every round,
//! fields captured too often in a short window get locked, and after a
//! fixed number of rounds the higher score wins.
//!
//! # Architecture
//!
//! - **Field**: one cell and its capture rule
//! - **Board**: the grid, adjacency and scoring
//! - **ActionPoints**: per-player turn economy
//! - **Round**: turn/round transitions and completion
//! - **Moves**: capture and voluntary end of turn
//! - **GameEngine**: facade bundling the rules with the operations
//!
//! The engine is synchronous and never locks; serializing access to a
//! session is the caller's job.
//!
//! # Example
//!
//! ```
//! use territory::{GameEngine, Role, Rules, TurnOutcome};
//!
//! let engine = GameEngine::new(Rules::default()).unwrap();
//! let mut session = engine.new_session("demo".to_string());
//! engine.join(&mut session, "alice".to_string()).unwrap();
//! engine.join(&mut session, "bob".to_string()).unwrap();
//!
//! let outcome = engine.apply_move(&mut session, Role::PlayerA, 0, 1).unwrap();
//! assert_eq!(outcome, TurnOutcome::Continues);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod economy;
mod engine;
mod error;
mod field;
pub mod invariants;
mod moves;
mod round;
mod rules;
mod session;
mod types;

pub use action::{Action, TurnOutcome};
pub use board::Board;
pub use economy::ActionPoints;
pub use engine::GameEngine;
pub use error::{MoveError, MoveErrorKind};
pub use field::Field;
pub use moves::{apply_move, end_turn};
pub use round::{advance_turn, recompute_scores};
pub use rules::{Rules, RulesError};
pub use session::{JoinError, Session};
pub use types::{BOARD_SIZE, Coord, PlayerId, Role, Status, Takeover, Winner};
