use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, error};

use crate::context::SchedulerState;
use crate::error::{ClaimPolicy, DispatchError};
use crate::strategies::scan::StopFinder;
use crate::types::cmd::Command;
use crate::types::direction::{Direction, ElevatorId, Floor, Stop};

/// Picks an elevator's next stop and commits to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rescheduler {
    policy: ClaimPolicy,
}

impl Rescheduler {
    pub fn new(policy: ClaimPolicy) -> Self {
        Rescheduler { policy }
    }

    /// Candidate stops, best first. Earlier entries always win; this is a
    /// priority order, not a ranking by distance.
    pub fn preferences(
        state: &SchedulerState,
        car_requests: &BTreeSet<Floor>,
        elevator: ElevatorId,
    ) -> Vec<Stop> {
        let Some(car) = state.elevators.get(elevator) else {
            return Vec::new();
        };
        let finder = StopFinder::new(&state.calls, car_requests, elevator);
        let last = car.last_floor;

        let candidates = match car.direction {
            Direction::Up => [
                finder.scan_up(last + 1, false),
                finder.scan_up(last + 1, true),
                finder.scan_down(last, false),
                finder.scan_down(last, true),
            ],
            Direction::Down => {
                let below = last.checked_sub(1);
                [
                    below.and_then(|from| finder.scan_down(from, false)),
                    below.and_then(|from| finder.scan_down(from, true)),
                    finder.scan_up(last, false),
                    finder.scan_up(last, true),
                ]
            }
        };
        candidates.into_iter().flatten().collect()
    }

    pub fn reschedule(
        &self,
        state: &mut SchedulerState,
        car_requests: &BTreeSet<Floor>,
        elevator: ElevatorId,
    ) -> Result<Vec<Command>, DispatchError> {
        let options = Self::preferences(state, car_requests, elevator);
        let car = state
            .elevators
            .get_mut(elevator)
            .ok_or(DispatchError::UnknownElevator(elevator))?;
        debug!(
            elevator,
            last_floor = car.last_floor,
            direction = %car.direction,
            ?options,
            "rescheduling"
        );

        let Some(&stop) = options.first() else {
            debug!(elevator, last_floor = car.last_floor, "nothing to do (now stopped)");
            car.next_direction = None;
            car.next_stop = None;
            return Ok(Vec::new());
        };
        self.commit(state, elevator, stop)
    }

    /// Claims the stop's hall call (if any) and moves the elevator there.
    pub(crate) fn commit(
        &self,
        state: &mut SchedulerState,
        elevator: ElevatorId,
        stop: Stop,
    ) -> Result<Vec<Command>, DispatchError> {
        if let Some(call) = stop.dir.call() {
            if let Err(conflict) = state.calls.claim(stop.floor, call, elevator) {
                match self.policy {
                    ClaimPolicy::Strict => return Err(conflict.into()),
                    ClaimPolicy::Lenient => {
                        error!(%conflict, "refusing claim commit");
                        return Ok(Vec::new());
                    }
                }
            }
        }

        let car = state
            .elevators
            .get_mut(elevator)
            .ok_or(DispatchError::UnknownElevator(elevator))?;
        if let Some(call) = stop.dir.call() {
            car.next_direction = Some(call);
        }
        car.next_stop = Some(stop);

        let mut commands = vec![Command::move_now(elevator, stop.floor)];
        match stop.floor.cmp(&car.last_floor) {
            Ordering::Less => {
                debug!(
                    elevator,
                    floor = stop.floor,
                    direction_change = car.direction == Direction::Up,
                    "moving down"
                );
                commands.push(Command::indicate(elevator, Direction::Down));
                car.direction = Direction::Down;
            }
            Ordering::Greater => {
                debug!(
                    elevator,
                    floor = stop.floor,
                    direction_change = car.direction == Direction::Down,
                    "moving up"
                );
                commands.push(Command::indicate(elevator, Direction::Up));
                car.direction = Direction::Up;
            }
            Ordering::Equal => {
                debug!(elevator, floor = stop.floor, "reopening");
            }
        }
        Ok(commands)
    }
}
