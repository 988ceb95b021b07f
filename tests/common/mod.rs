#![allow(dead_code)]

use std::collections::BTreeSet;

use elevator_dispatch::{
    ClaimPolicy, Command, DispatchError, Dispatcher, ElevatorId, ElevatorPicker, Event, Fleet,
    Floor,
};

#[derive(Debug, Clone, Default)]
pub struct Car {
    pub floor: Floor,
    pub requests: BTreeSet<Floor>,
    pub target: Option<Floor>,
    pub lamps: (bool, bool),
}

/// In-process stand-in for the simulation host: cars jump straight to the
/// floor they were last sent to, announcing every floor on the way.
#[derive(Debug, Clone)]
pub struct SimHost {
    pub cars: Vec<Car>,
    pub issued: Vec<Command>,
}

impl SimHost {
    pub fn new(elevators: usize) -> Self {
        SimHost {
            cars: vec![Car::default(); elevators],
            issued: Vec::new(),
        }
    }

    pub fn apply(&mut self, commands: &[Command]) {
        for command in commands {
            match *command {
                Command::MoveTo {
                    elevator, floor, ..
                } => self.cars[elevator].target = Some(floor),
                Command::SetIndicators { elevator, up, down } => {
                    self.cars[elevator].lamps = (up, down)
                }
            }
            self.issued.push(command.clone());
        }
    }

    /// Events the host would report if `elevator` were left to run until it
    /// next stops or goes idle.
    pub fn advance(&mut self, elevator: ElevatorId) -> Vec<Event> {
        let car = &mut self.cars[elevator];
        let Some(target) = car.target.take() else {
            return vec![Event::Idle { elevator }];
        };
        let mut events = Vec::new();
        let passing: Vec<Floor> = if target > car.floor {
            (car.floor + 1..target).collect()
        } else {
            (target + 1..car.floor).rev().collect()
        };
        for floor in passing {
            events.push(Event::FloorPassed { elevator, floor });
        }
        car.floor = target;
        car.requests.remove(&target);
        events.push(Event::ArrivedAtFloor {
            elevator,
            floor: target,
        });
        events
    }

    /// Moves `elevator` one floor towards its target.
    pub fn step(&mut self, elevator: ElevatorId) -> Vec<Event> {
        let car = &mut self.cars[elevator];
        let Some(target) = car.target else {
            return vec![Event::Idle { elevator }];
        };
        if car.floor < target {
            car.floor += 1;
        } else if car.floor > target {
            car.floor -= 1;
        }
        if car.floor == target {
            car.target = None;
            car.requests.remove(&target);
            vec![Event::ArrivedAtFloor {
                elevator,
                floor: target,
            }]
        } else {
            vec![Event::FloorPassed {
                elevator,
                floor: car.floor,
            }]
        }
    }
}

impl Fleet for SimHost {
    fn elevator_count(&self) -> usize {
        self.cars.len()
    }

    fn current_floor(&self, elevator: ElevatorId) -> Floor {
        self.cars[elevator].floor
    }

    fn pending_car_requests(&self, elevator: ElevatorId) -> BTreeSet<Floor> {
        self.cars[elevator].requests.clone()
    }
}

pub struct Harness<P> {
    pub host: SimHost,
    pub dispatcher: Dispatcher<P>,
}

impl<P: ElevatorPicker> Harness<P> {
    pub fn new(elevators: usize, floors: usize, picker: P) -> Self {
        let mut host = SimHost::new(elevators);
        let dispatcher = Dispatcher::new(&host, floors, picker, ClaimPolicy::Strict);
        host.apply(&dispatcher.startup_commands());
        Harness { host, dispatcher }
    }

    pub fn try_send(&mut self, event: Event) -> Result<Vec<Command>, DispatchError> {
        let commands = self.dispatcher.handle(&self.host, &event)?;
        self.host.apply(&commands);
        Ok(commands)
    }

    pub fn send(&mut self, event: Event) -> Vec<Command> {
        self.try_send(event).expect("dispatch failed")
    }

    pub fn press_car_button(&mut self, elevator: ElevatorId, floor: Floor) -> Vec<Command> {
        self.host.cars[elevator].requests.insert(floor);
        self.send(Event::CarRequestMade { elevator, floor })
    }

    /// Lets one elevator run to its next stop (or report idle).
    pub fn run(&mut self, elevator: ElevatorId) -> Vec<Command> {
        let mut commands = Vec::new();
        for event in self.host.advance(elevator) {
            commands.extend(self.send(event));
        }
        commands
    }

    pub fn step(&mut self, elevator: ElevatorId) -> Vec<Command> {
        let mut commands = Vec::new();
        for event in self.host.step(elevator) {
            commands.extend(self.send(event));
        }
        commands
    }

    /// Runs every elevator until no hall call or car request is left,
    /// returning the number of rounds it took.
    pub fn drain(&mut self, max_rounds: usize) -> Option<usize> {
        for round in 0..max_rounds {
            let pending_requests = self.host.cars.iter().any(|car| !car.requests.is_empty());
            if self.dispatcher.snapshot().pending_calls().is_empty() && !pending_requests {
                return Some(round);
            }
            for elevator in 0..self.host.cars.len() {
                self.run(elevator);
                assert!(self.dispatcher.snapshot().claims_consistent());
            }
        }
        None
    }
}
