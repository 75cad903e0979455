//! The 9×9 grid of fields.

use crate::{BOARD_SIZE, Coord, Field, MoveError, Role};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Fixed-size board, indexed `[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    fields: [[Field; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the opening layout.
    ///
    /// The centre is worth cost 6 / income 3, the two free corners cost 2 /
    /// income 2, player A starts on `(0, 0)` and player B on `(8, 8)`.
    #[instrument]
    pub fn seeded() -> Self {
        let last = BOARD_SIZE - 1;
        let center = BOARD_SIZE / 2;
        let fields = std::array::from_fn(|x| {
            std::array::from_fn(|y| match (x, y) {
                (0, 0) => Field::owned_by(Role::PlayerA, 1, 1),
                (x, y) if x == last && y == last => Field::owned_by(Role::PlayerB, 1, 1),
                (x, y) if x == center && y == center => Field::new(6, 3),
                (0, y) if y == last => Field::new(2, 2),
                (x, 0) if x == last => Field::new(2, 2),
                _ => Field::new(1, 1),
            })
        });
        Self { fields }
    }

    /// Builds a board from explicit fields.
    pub fn from_fields(fields: [[Field; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { fields }
    }

    /// Field at a coordinate.
    pub fn get(&self, coord: Coord) -> &Field {
        &self.fields[coord.x()][coord.y()]
    }

    /// Mutable field at a coordinate.
    pub fn get_mut(&mut self, coord: Coord) -> &mut Field {
        &mut self.fields[coord.x()][coord.y()]
    }

    /// Rows of the board.
    pub fn rows(&self) -> &[[Field; BOARD_SIZE]; BOARD_SIZE] {
        &self.fields
    }

    /// Iterates over every field.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().flatten()
    }

    /// True if any neighbour of `coord` is owned by `role`.
    pub fn is_adjacent_to_owned(&self, coord: Coord, role: Role) -> bool {
        coord
            .neighbors()
            .any(|neighbor| self.get(neighbor).is_owned_by(role))
    }

    /// Sum of owner points over every field held by `role`, saturating at
    /// `u32::MAX`.
    pub fn score(&self, role: Role) -> u32 {
        self.iter()
            .filter(|field| field.is_owned_by(role))
            .map(Field::owner_points)
            .fold(0, u32::saturating_add)
    }

    /// Adds one round of income to every owned field.
    pub fn scale_owned_fields(&mut self) -> Result<(), MoveError> {
        self.fields
            .iter_mut()
            .flatten()
            .filter(|field| field.owner().is_some())
            .try_for_each(Field::scale_owner_points)
    }

    /// Formats the board as text, `A`/`B` for owned fields and the cost
    /// for free ones; locked fields are marked with `#`.
    pub fn display(&self, current_round: u32) -> String {
        let mut result = String::from("   ");
        for y in 0..BOARD_SIZE {
            result.push_str(&format!(" {y} "));
        }
        result.push('\n');

        for (x, row) in self.fields.iter().enumerate() {
            result.push_str(&format!("{x}  "));
            for field in row {
                let symbol = match field.owner() {
                    Some(Role::PlayerA) => "A".to_string(),
                    Some(Role::PlayerB) => "B".to_string(),
                    None => field.cost().to_string(),
                };
                let lock = if field.is_blocked(current_round) { '#' } else { ' ' };
                result.push_str(&format!("{symbol:>2}{lock}"));
            }
            result.push('\n');
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::seeded()
    }
}
