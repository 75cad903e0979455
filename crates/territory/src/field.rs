//! A single board cell and the capture rule applied to it.

use crate::{ActionPoints, MoveError, MoveErrorKind, Role, Rules, Takeover};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Mutable state of one board cell.
///
/// `owner_points` is only meaningful while `owner` is set; an unowned
/// field always carries zero owner points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    base_cost: u32,
    cost: u32,
    income: u32,
    owner_points: u32,
    owner: Option<Role>,
    block_until_round: Option<u32>,
    takeover_history: Vec<Takeover>,
}

impl Field {
    /// Creates an unowned field priced at `cost` and yielding `income`.
    pub fn new(cost: u32, income: u32) -> Self {
        Self {
            base_cost: cost,
            cost,
            income,
            owner_points: 0,
            owner: None,
            block_until_round: None,
            takeover_history: Vec::new(),
        }
    }

    /// Creates a field that starts in a player's hands with one owner point.
    pub fn owned_by(role: Role, cost: u32, income: u32) -> Self {
        Self {
            owner_points: 1,
            owner: Some(role),
            ..Self::new(cost, income)
        }
    }

    /// Original capture price, never changes.
    pub fn base_cost(&self) -> u32 {
        self.base_cost
    }

    /// Current capture price.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Owner points gained per round.
    pub fn income(&self) -> u32 {
        self.income
    }

    /// Score credited to the current owner.
    pub fn owner_points(&self) -> u32 {
        self.owner_points
    }

    /// Current owner, if any.
    pub fn owner(&self) -> Option<Role> {
        self.owner
    }

    /// Round before which nobody may capture this field.
    pub fn block_until_round(&self) -> Option<u32> {
        self.block_until_round
    }

    /// Every capture of this field, oldest first.
    pub fn takeover_history(&self) -> &[Takeover] {
        &self.takeover_history
    }

    /// True if the field is owned by `role`.
    pub fn is_owned_by(&self, role: Role) -> bool {
        self.owner == Some(role)
    }

    /// True while the lock is still in force at `round`.
    pub fn is_blocked(&self, round: u32) -> bool {
        self.block_until_round.is_some_and(|until| until > round)
    }

    /// Checks every capture precondition without mutating anything.
    pub fn check_capture(
        &self,
        points: &ActionPoints,
        role: Role,
        current_round: u32,
    ) -> Result<(), MoveError> {
        if self.is_owned_by(role) {
            return Err(MoveError::new(MoveErrorKind::AlreadyOwned));
        }

        if let Some(until) = self.block_until_round
            && until > current_round
        {
            return Err(MoveError::new(MoveErrorKind::Blocked(until)));
        }

        points.ensure_affordable(role, self.cost)
    }

    /// Captures this field for `role`, paying its current cost.
    ///
    /// The pre-capture cost is deducted, the takeover is recorded, the
    /// lock policy is evaluated against the history including this
    /// takeover, and only then is the cost raised to
    /// `base_cost * income + 1`.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyOwned`, `Blocked` or `InsufficientPoints`, or
    /// with `InvariantViolation` when the new cost or lock round does not
    /// fit in a `u32`; the field and balances are untouched on failure.
    #[instrument(skip(self, points, rules), fields(cost = self.cost))]
    pub fn attempt_capture(
        &mut self,
        points: &mut ActionPoints,
        role: Role,
        current_round: u32,
        rules: &Rules,
    ) -> Result<(), MoveError> {
        if let Err(e) = self.check_capture(points, role, current_round) {
            warn!(error = %e.kind(), "Capture rejected");
            return Err(e);
        }

        let new_cost = self.recaptured_cost()?;
        let block_until = if self.blocks_after_capture(current_round, rules) {
            let until = current_round
                .checked_add(*rules.block_duration())
                .ok_or_else(|| {
                    MoveError::new(MoveErrorKind::InvariantViolation(format!(
                        "Lock round overflows: round {current_round} + {}",
                        rules.block_duration()
                    )))
                })?;
            Some(until)
        } else {
            None
        };

        points.spend(role, self.cost)?;

        self.owner = Some(role);
        self.owner_points = 1;
        self.takeover_history
            .push(Takeover::new(current_round, role));

        if let Some(until) = block_until {
            info!(until, "Field blocked after repeated takeovers");
            self.block_until_round = Some(until);
        }

        self.cost = new_cost;
        debug!(new_cost = self.cost, "Field captured");
        Ok(())
    }

    fn recaptured_cost(&self) -> Result<u32, MoveError> {
        self.base_cost
            .checked_mul(self.income)
            .and_then(|cost| cost.checked_add(1))
            .ok_or_else(|| {
                MoveError::new(MoveErrorKind::InvariantViolation(format!(
                    "Capture cost overflows: {} * {} + 1",
                    self.base_cost, self.income
                )))
            })
    }

    /// Whether a capture at `current_round` trips the lock, counting the
    /// capture itself as one more recent takeover.
    fn blocks_after_capture(&self, current_round: u32, rules: &Rules) -> bool {
        let threshold = *rules.takeovers_to_block();
        if self.takeover_history.len() + 1 < threshold {
            return false;
        }

        let window_start = current_round.saturating_sub(*rules.takeover_time_range());
        let recent = self
            .takeover_history
            .iter()
            .filter(|entry| entry.round >= window_start)
            .count();

        recent + 1 >= threshold
    }

    /// Adds one round of income to the owner's points.
    ///
    /// # Errors
    ///
    /// Returns an `InvariantViolation` if the field is unowned or carries
    /// zero owner points; either means the session state is corrupt.
    pub fn scale_owner_points(&mut self) -> Result<(), MoveError> {
        if self.owner.is_none() {
            return Err(MoveError::new(MoveErrorKind::InvariantViolation(
                "Field has no owner to scale points for".to_string(),
            )));
        }
        if self.owner_points == 0 {
            return Err(MoveError::new(MoveErrorKind::InvariantViolation(
                "Field owner points is zero, cannot scale".to_string(),
            )));
        }

        self.owner_points = self
            .owner_points
            .checked_add(self.income)
            .ok_or_else(|| {
                MoveError::new(MoveErrorKind::InvariantViolation(
                    "Field owner points overflow".to_string(),
                ))
            })?;
        Ok(())
    }
}
