use serde::Serialize;

use crate::types::direction::{Direction, Floor, Stop};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElevatorState {
    pub direction: Direction,
    /// Direction switch staged for the next arrival.
    pub next_direction: Option<Direction>,
    pub last_floor: Floor,
    pub next_stop: Option<Stop>,
}

impl ElevatorState {
    pub fn new(last_floor: Floor) -> Self {
        ElevatorState {
            direction: Direction::Up,
            last_floor,
            ..ElevatorState::default()
        }
    }

    /// Commits a staged direction switch, returning the new direction when
    /// it actually changed. The staged value is cleared either way.
    pub fn commit_next_direction(&mut self) -> Option<Direction> {
        let switched = self
            .next_direction
            .take()
            .filter(|next| *next != self.direction);
        if let Some(next) = switched {
            self.direction = next;
        }
        switched
    }

    /// Puts back the direction and staged switch recorded in `saved`.
    pub fn restore_direction(&mut self, saved: &ElevatorState) {
        self.direction = saved.direction;
        self.next_direction = saved.next_direction;
    }
}
