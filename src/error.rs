use thiserror::Error;

use crate::types::direction::{Direction, ElevatorId, Floor};

/// Two elevators believe they own the same hall call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "elevator {elevator} tried to claim the {direction} call at floor {floor}, \
     already held by elevator {holder}"
)]
pub struct ClaimConflict {
    pub elevator: ElevatorId,
    pub floor: Floor,
    pub direction: Direction,
    pub holder: ElevatorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("claim invariant violated: {0}")]
    ClaimConflict(#[from] ClaimConflict),
    #[error("unknown elevator {0}")]
    UnknownElevator(ElevatorId),
    #[error("unknown floor {0}")]
    UnknownFloor(Floor),
}

/// What the rescheduler does when a claim commit hits a [`ClaimConflict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClaimPolicy {
    /// Fail the event with [`DispatchError::ClaimConflict`].
    Strict,
    /// Log the conflict, keep the prior claim and skip the commit.
    Lenient,
}

impl Default for ClaimPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ClaimPolicy::Strict
        } else {
            ClaimPolicy::Lenient
        }
    }
}
