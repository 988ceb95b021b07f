use tracing::{debug, debug_span, info};

use crate::context::{SchedulerState, Snapshot};
use crate::elevator::ElevatorState;
use crate::error::{ClaimPolicy, DispatchError};
use crate::fleet::Fleet;
use crate::registry::CallRegistry;
use crate::scheduler::Rescheduler;
use crate::strategies::picker::{ElevatorPicker, LocalityPicker};
use crate::types::cmd::Command;
use crate::types::direction::{Direction, ElevatorId, Floor};
use crate::types::event::Event;

/// Event-driven front of the bank. Each call to [`Dispatcher::handle`] runs
/// to completion and returns the commands it issued, in order.
#[derive(Debug)]
pub struct Dispatcher<P = LocalityPicker> {
    state: SchedulerState,
    picker: P,
    rescheduler: Rescheduler,
}

impl<P: ElevatorPicker> Dispatcher<P> {
    pub fn new<F: Fleet>(fleet: &F, floor_count: usize, picker: P, policy: ClaimPolicy) -> Self {
        let starting_floors = (0..fleet.elevator_count()).map(|e| fleet.current_floor(e));
        Dispatcher {
            state: SchedulerState::new(starting_floors, floor_count),
            picker,
            rescheduler: Rescheduler::new(policy),
        }
    }

    /// Every elevator starts out indicating "up".
    pub fn startup_commands(&self) -> Vec<Command> {
        (0..self.state.elevator_count())
            .map(|elevator| Command::indicate(elevator, Direction::Up))
            .collect()
    }

    pub fn elevator(&self, elevator: ElevatorId) -> Option<&ElevatorState> {
        self.state.elevators.get(elevator)
    }

    pub fn calls(&self) -> &CallRegistry {
        &self.state.calls
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn handle<F: Fleet>(
        &mut self,
        fleet: &F,
        event: &Event,
    ) -> Result<Vec<Command>, DispatchError> {
        self.validate(event)?;
        match *event {
            Event::CarRequestMade { elevator, floor } => {
                debug!(elevator, floor, "car request");
                self.reschedule(fleet, elevator)
            }
            Event::FloorPassed { elevator, floor } => {
                self.state.elevators[elevator].last_floor = floor;
                Ok(Vec::new())
            }
            Event::ArrivedAtFloor { elevator, floor } => self.arrived(fleet, elevator, floor),
            Event::Idle { elevator } => self.reschedule(fleet, elevator),
            Event::HallCallMade { floor, direction } => {
                self.state.calls.press(floor, direction);
                let elevator = self.picker.pick(&self.state.elevators, floor, direction);
                info!(floor, %direction, elevator, "hall call");
                if elevator >= self.state.elevator_count() {
                    return Err(DispatchError::UnknownElevator(elevator));
                }
                self.reschedule(fleet, elevator)
            }
        }
    }

    pub fn reschedule<F: Fleet>(
        &mut self,
        fleet: &F,
        elevator: ElevatorId,
    ) -> Result<Vec<Command>, DispatchError> {
        let _span = debug_span!(
            "reschedule",
            elevator,
            current_floor = fleet.current_floor(elevator)
        )
        .entered();
        let car_requests = fleet.pending_car_requests(elevator);
        self.rescheduler
            .reschedule(&mut self.state, &car_requests, elevator)
    }

    fn arrived<F: Fleet>(
        &mut self,
        fleet: &F,
        elevator: ElevatorId,
        floor: Floor,
    ) -> Result<Vec<Command>, DispatchError> {
        debug!(elevator, floor, "stopped at floor");
        let car = &mut self.state.elevators[elevator];
        car.last_floor = floor;
        let saved = car.clone();

        let mut commands = Vec::new();
        if let Some(direction) = car.commit_next_direction() {
            commands.push(Command::indicate(elevator, direction));
        }
        // served call follows the direction committed on arrival, not the rescheduled one
        let direction = car.direction;
        match self.reschedule(fleet, elevator) {
            Ok(rescheduled) => commands.extend(rescheduled),
            Err(err) => {
                // the lamps were never switched, so neither is the direction
                self.state.elevators[elevator].restore_direction(&saved);
                return Err(err);
            }
        }

        if self.state.calls.release(floor, direction, elevator) {
            debug!(elevator, floor, %direction, "call served");
        }
        Ok(commands)
    }

    fn validate(&self, event: &Event) -> Result<(), DispatchError> {
        if let Some(elevator) = event.elevator() {
            if elevator >= self.state.elevator_count() {
                return Err(DispatchError::UnknownElevator(elevator));
            }
        }
        if let Some(floor) = event.floor() {
            if floor >= self.state.floor_count() {
                return Err(DispatchError::UnknownFloor(floor));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::FleetMirror;
    use crate::registry::FloorCall;
    use crate::types::direction::{Stop, StopDirection};

    type FixedPicker = LocalityPicker<fn(usize) -> ElevatorId>;

    fn first(_: usize) -> ElevatorId {
        0
    }

    fn setup(elevators: usize) -> (FleetMirror, Dispatcher<FixedPicker>) {
        let fleet = FleetMirror::new(elevators, 0);
        let dispatcher = Dispatcher::new(
            &fleet,
            6,
            LocalityPicker::new(first as fn(usize) -> ElevatorId),
            ClaimPolicy::Strict,
        );
        (fleet, dispatcher)
    }

    fn deliver(
        fleet: &mut FleetMirror,
        dispatcher: &mut Dispatcher<FixedPicker>,
        event: Event,
    ) -> Vec<Command> {
        fleet.observe(&event);
        dispatcher.handle(fleet, &event).unwrap()
    }

    #[test]
    fn startup_indicates_up_everywhere() {
        let (_, dispatcher) = setup(3);
        assert_eq!(
            dispatcher.startup_commands(),
            vec![
                Command::indicate(0, Direction::Up),
                Command::indicate(1, Direction::Up),
                Command::indicate(2, Direction::Up),
            ]
        );
        assert_eq!(dispatcher.elevator(2).unwrap().direction, Direction::Up);
    }

    #[test]
    fn floor_passed_only_tracks_position() {
        let (mut fleet, mut dispatcher) = setup(1);
        let commands = deliver(
            &mut fleet,
            &mut dispatcher,
            Event::FloorPassed { elevator: 0, floor: 3 },
        );
        assert!(commands.is_empty());
        assert_eq!(dispatcher.elevator(0).unwrap().last_floor, 3);
    }

    #[test]
    fn arrival_commits_staged_direction_before_rescheduling() {
        let (mut fleet, mut dispatcher) = setup(1);
        deliver(
            &mut fleet,
            &mut dispatcher,
            Event::HallCallMade {
                floor: 3,
                direction: Direction::Down,
            },
        );
        assert_eq!(
            dispatcher.elevator(0).unwrap().next_stop,
            Some(Stop::new(3, StopDirection::Down))
        );

        let commands = deliver(
            &mut fleet,
            &mut dispatcher,
            Event::ArrivedAtFloor { elevator: 0, floor: 3 },
        );
        // switch lamps, then reopen for the call being served
        assert_eq!(
            commands,
            vec![Command::indicate(0, Direction::Down), Command::move_now(0, 3)]
        );
        let car = dispatcher.elevator(0).unwrap();
        assert_eq!(car.direction, Direction::Down);
        assert_eq!(dispatcher.calls().get(3).unwrap(), &FloorCall::default());
    }

    #[test]
    fn arrival_without_matching_claim_keeps_call() {
        let (mut fleet, mut dispatcher) = setup(2);
        deliver(
            &mut fleet,
            &mut dispatcher,
            Event::HallCallMade {
                floor: 2,
                direction: Direction::Up,
            },
        );
        // elevator 1 stops at 2 on its own; elevator 0 holds the claim
        deliver(
            &mut fleet,
            &mut dispatcher,
            Event::ArrivedAtFloor { elevator: 1, floor: 2 },
        );
        let call = dispatcher.calls().get(2).unwrap();
        assert!(call.up_pressed);
        assert_eq!(call.up_claimed_by, Some(0));
    }

    #[test]
    fn rejects_out_of_range_events() {
        let (fleet, mut dispatcher) = setup(2);
        assert_eq!(
            dispatcher.handle(&fleet, &Event::Idle { elevator: 2 }),
            Err(DispatchError::UnknownElevator(2))
        );
        assert_eq!(
            dispatcher.handle(
                &fleet,
                &Event::HallCallMade {
                    floor: 6,
                    direction: Direction::Up
                }
            ),
            Err(DispatchError::UnknownFloor(6))
        );
    }

    #[test]
    fn picker_out_of_range_is_an_error() {
        let fleet = FleetMirror::new(1, 0);
        let mut dispatcher = Dispatcher::new(
            &fleet,
            4,
            LocalityPicker::new(|_: usize| 9),
            ClaimPolicy::Strict,
        );
        let event = Event::HallCallMade {
            floor: 0,
            direction: Direction::Down,
        };
        assert_eq!(
            dispatcher.handle(&fleet, &event),
            Err(DispatchError::UnknownElevator(9))
        );
    }
}
