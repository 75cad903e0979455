//! Core domain types shared by every part of the engine.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 9;

/// Identifier of a player as resolved by the identity directory.
pub type PlayerId = String;

/// One of the two seats in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// First seat; always moves first.
    PlayerA,
    /// Second seat.
    PlayerB,
}

impl Role {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Role::PlayerA => Role::PlayerB,
            Role::PlayerB => Role::PlayerA,
        }
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Waiting for both seats to be filled.
    Waiting,
    /// Both players joined, moves are accepted.
    Active,
    /// Round limit exceeded, winner fixed.
    Completed,
}

/// Final result of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Winner {
    /// Player A finished with the strictly higher score.
    PlayerA,
    /// Player B finished with the strictly higher score.
    PlayerB,
    /// Scores were equal.
    Draw,
}

impl Winner {
    /// Decides the winner by strict score comparison.
    pub fn from_scores(score_a: u32, score_b: u32) -> Self {
        match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => Winner::PlayerA,
            std::cmp::Ordering::Less => Winner::PlayerB,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }
}

impl From<Role> for Winner {
    fn from(role: Role) -> Self {
        match role {
            Role::PlayerA => Winner::PlayerA,
            Role::PlayerB => Winner::PlayerB,
        }
    }
}

/// One entry of a field's takeover history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Takeover {
    /// Round in which the capture happened.
    pub round: u32,
    /// Player that captured the field.
    pub player: Role,
}

/// A validated board coordinate (`x` is the row, `y` the column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    x: usize,
    y: usize,
}

impl Coord {
    /// Builds a coordinate if both components lie inside the board.
    pub fn try_new(x: i64, y: i64) -> Option<Self> {
        let size = BOARD_SIZE as i64;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self {
                x: x as usize,
                y: y as usize,
            })
        } else {
            None
        }
    }

    /// Row index.
    pub fn x(self) -> usize {
        self.x
    }

    /// Column index.
    pub fn y(self) -> usize {
        self.y
    }

    /// The up to eight cells surrounding this one, clamped at the board edge.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        const DIRECTIONS: [(i64, i64); 8] = [
            (0, 1),
            (1, 0),
            (0, -1),
            (-1, 0),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];

        DIRECTIONS
            .into_iter()
            .filter_map(move |(dx, dy)| Coord::try_new(self.x as i64 + dx, self.y as i64 + dy))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
