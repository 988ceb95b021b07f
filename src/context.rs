use serde::Serialize;

use crate::elevator::ElevatorState;
use crate::registry::{CallRegistry, FloorCall};
use crate::types::direction::{Direction, ElevatorId, Floor};

/// All mutable dispatch state of one bank.
#[derive(Debug, Clone)]
pub struct SchedulerState {
    pub elevators: Vec<ElevatorState>,
    pub calls: CallRegistry,
}

/// Read-only copy of [`SchedulerState`] for logging and assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub elevators: Vec<ElevatorState>,
    pub floors: Vec<FloorCall>,
}

impl SchedulerState {
    pub fn new(starting_floors: impl IntoIterator<Item = Floor>, floor_count: usize) -> Self {
        SchedulerState {
            elevators: starting_floors
                .into_iter()
                .map(ElevatorState::new)
                .collect(),
            calls: CallRegistry::new(floor_count),
        }
    }

    pub fn elevator_count(&self) -> usize {
        self.elevators.len()
    }

    pub fn floor_count(&self) -> usize {
        self.calls.floor_count()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elevators: self.elevators.clone(),
            floors: self.calls.floors().to_vec(),
        }
    }
}

impl Snapshot {
    /// Every claim must sit on a pressed call. Exclusivity per (floor,
    /// direction) holds structurally since each slot stores one holder.
    pub fn claims_consistent(&self) -> bool {
        self.floors.iter().all(|call| {
            [Direction::Up, Direction::Down]
                .into_iter()
                .all(|d| call.claimed_by(d).is_none() || call.pressed(d))
        })
    }

    pub fn pending_calls(&self) -> Vec<(Floor, Direction)> {
        self.floors
            .iter()
            .enumerate()
            .flat_map(|(floor, call)| {
                [Direction::Up, Direction::Down]
                    .into_iter()
                    .filter(move |d| call.pressed(*d))
                    .map(move |d| (floor, d))
            })
            .collect()
    }

    pub fn claims_of(&self, elevator: ElevatorId) -> Vec<(Floor, Direction)> {
        self.floors
            .iter()
            .enumerate()
            .flat_map(|(floor, call)| {
                [Direction::Up, Direction::Down]
                    .into_iter()
                    .filter(move |d| call.claimed_by(*d) == Some(elevator))
                    .map(move |d| (floor, d))
            })
            .collect()
    }
}
