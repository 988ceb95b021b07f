use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::elevator::ElevatorState;
use crate::types::direction::{Direction, ElevatorId, Floor};

/// Chooses which elevator is nudged first when a hall call comes in.
pub trait ElevatorPicker {
    fn pick(&mut self, elevators: &[ElevatorState], floor: Floor, direction: Direction)
    -> ElevatorId;
}

/// Last resort when no elevator is already heading towards the call.
pub trait FallbackSelector {
    fn select(&mut self, elevator_count: usize) -> ElevatorId;
}

impl<F> FallbackSelector for F
where
    F: FnMut(usize) -> ElevatorId,
{
    fn select(&mut self, elevator_count: usize) -> ElevatorId {
        self(elevator_count)
    }
}

#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn seeded(seed: u64) -> Self {
        RandomSelector {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        RandomSelector {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl FallbackSelector for RandomSelector {
    fn select(&mut self, elevator_count: usize) -> ElevatorId {
        if elevator_count == 0 {
            return 0;
        }
        self.rng.random_range(0..elevator_count)
    }
}

/// Prefers the first elevator travelling in the call's direction that has
/// not yet passed the calling floor.
#[derive(Debug, Clone, Default)]
pub struct LocalityPicker<S = RandomSelector> {
    fallback: S,
}

impl<S: FallbackSelector> LocalityPicker<S> {
    pub fn new(fallback: S) -> Self {
        LocalityPicker { fallback }
    }
}

impl<S: FallbackSelector> ElevatorPicker for LocalityPicker<S> {
    fn pick(
        &mut self,
        elevators: &[ElevatorState],
        floor: Floor,
        direction: Direction,
    ) -> ElevatorId {
        elevators
            .iter()
            .position(|car| {
                car.direction == direction
                    && match direction {
                        Direction::Up => car.last_floor < floor,
                        Direction::Down => car.last_floor > floor,
                    }
            })
            .unwrap_or_else(|| self.fallback.select(elevators.len()))
    }
}
