//! Per-player action point balances.

use crate::{MoveError, MoveErrorKind, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Action point balances of both seats.
///
/// Balances never go negative: [`ActionPoints::spend`] refuses any
/// amount above the current balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPoints {
    #[serde(rename = "action_points_a")]
    a: u32,
    #[serde(rename = "action_points_b")]
    b: u32,
}

impl ActionPoints {
    /// Creates balances with explicit values.
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Current balance of a seat.
    pub fn balance(&self, role: Role) -> u32 {
        match role {
            Role::PlayerA => self.a,
            Role::PlayerB => self.b,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut u32 {
        match role {
            Role::PlayerA => &mut self.a,
            Role::PlayerB => &mut self.b,
        }
    }

    /// Checks that a seat can pay `amount` without spending anything.
    pub fn ensure_affordable(&self, role: Role, amount: u32) -> Result<(), MoveError> {
        let available = self.balance(role);
        if available < amount {
            return Err(MoveError::new(MoveErrorKind::InsufficientPoints {
                required: amount,
                available,
            }));
        }
        Ok(())
    }

    /// Deducts `amount` from a seat.
    #[instrument(skip(self))]
    pub fn spend(&mut self, role: Role, amount: u32) -> Result<(), MoveError> {
        self.ensure_affordable(role, amount)?;
        let slot = self.slot_mut(role);
        *slot -= amount;
        debug!(remaining = *slot, "Action points spent");
        Ok(())
    }

    /// Adds `amount` to a seat.
    #[instrument(skip(self))]
    pub fn grant(&mut self, role: Role, amount: u32) {
        let slot = self.slot_mut(role);
        *slot = slot.saturating_add(amount);
        debug!(balance = *slot, "Action points granted");
    }

    /// Sets both balances, used when a session becomes active.
    pub fn reset(&mut self, amount: u32) {
        self.a = amount;
        self.b = amount;
    }

    /// True once a seat has nothing left to spend.
    pub fn is_exhausted(&self, role: Role) -> bool {
        self.balance(role) == 0
    }
}
