//! Tunable rule constants for a match.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Rule constants applied by the engine.
///
/// Every key is optional when deserializing; missing keys take the
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// The game completes once the round counter exceeds this value.
    rounds: u32,
    /// Points granted at turn end, also the opening balance of both players.
    action_points_per_round: u32,
    /// Number of recent takeovers that locks a field.
    takeovers_to_block: usize,
    /// How many rounds back a takeover still counts as recent.
    takeover_time_range: u32,
    /// How many rounds a locked field stays locked.
    block_duration: u32,
}

impl Rules {
    /// Creates a rule set from explicit values.
    pub fn new(
        rounds: u32,
        action_points_per_round: u32,
        takeovers_to_block: usize,
        takeover_time_range: u32,
        block_duration: u32,
    ) -> Self {
        Self {
            rounds,
            action_points_per_round,
            takeovers_to_block,
            takeover_time_range,
            block_duration,
        }
    }

    /// Rejects rule sets that would make the game unplayable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.rounds == 0 {
            return Err(RulesError::new("rounds must be at least 1"));
        }
        if self.action_points_per_round == 0 {
            return Err(RulesError::new("action_points_per_round must be at least 1"));
        }
        if self.takeovers_to_block == 0 {
            return Err(RulesError::new("takeovers_to_block must be at least 1"));
        }
        // Play continues through round `rounds + 1`, and a lock taken then
        // must still be representable.
        if self
            .rounds
            .checked_add(1)
            .and_then(|last| last.checked_add(self.block_duration))
            .is_none()
        {
            return Err(RulesError::new(
                "rounds + 1 + block_duration must fit in a u32",
            ));
        }
        debug!(rules = ?self, "Rules validated");
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rounds: 20,
            action_points_per_round: 3,
            takeovers_to_block: 3,
            takeover_time_range: 4,
            block_duration: 2,
        }
    }
}

/// Invalid rule configuration.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid rules: {}", message)]
pub struct RulesError {
    /// What was wrong.
    pub message: String,
}

impl RulesError {
    /// Creates a new rules error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
