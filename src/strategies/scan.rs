use std::collections::BTreeSet;

use crate::registry::CallRegistry;
use crate::types::direction::{Direction, ElevatorId, Floor, Stop, StopDirection};

/// Nearest-stop queries for one elevator over the shared call registry and
/// the elevator's own car requests. Pure: nothing here mutates state.
#[derive(Debug, Clone, Copy)]
pub struct StopFinder<'a> {
    calls: &'a CallRegistry,
    car_requests: &'a BTreeSet<Floor>,
    elevator: ElevatorId,
}

impl<'a> StopFinder<'a> {
    pub fn new(
        calls: &'a CallRegistry,
        car_requests: &'a BTreeSet<Floor>,
        elevator: ElevatorId,
    ) -> Self {
        StopFinder {
            calls,
            car_requests,
            elevator,
        }
    }

    /// Nearest stop at or above `from`.
    pub fn scan_up(&self, from: Floor, allow_opposite: bool) -> Option<Stop> {
        let car = self.car_requests.range(from..).next().copied();
        let hall = (from..self.calls.floor_count())
            .find_map(|floor| self.hall_call_at(floor, Direction::Up, allow_opposite));
        Self::prefer(car, hall, |car, hall| car < hall)
    }

    /// Nearest stop at or below `from`.
    pub fn scan_down(&self, from: Floor, allow_opposite: bool) -> Option<Stop> {
        let car = self.car_requests.range(..=from).next_back().copied();
        let hall = if from < self.calls.floor_count() {
            (0..=from)
                .rev()
                .find_map(|floor| self.hall_call_at(floor, Direction::Down, allow_opposite))
        } else {
            None
        };
        Self::prefer(car, hall, |car, hall| car > hall)
    }

    fn hall_call_at(&self, floor: Floor, scan: Direction, allow_opposite: bool) -> Option<Stop> {
        let call = self.calls.get(floor)?;
        if call.claimable_by(scan, self.elevator) {
            return Some(Stop::new(floor, scan.into()));
        }
        let opposite = scan.opposite();
        (allow_opposite && call.claimable_by(opposite, self.elevator))
            .then(|| Stop::new(floor, opposite.into()))
    }

    /// A car request only wins when strictly closer than the hall call.
    fn prefer(
        car: Option<Floor>,
        hall: Option<Stop>,
        car_is_closer: impl Fn(Floor, Floor) -> bool,
    ) -> Option<Stop> {
        match (car, hall) {
            (Some(car), Some(hall)) if !car_is_closer(car, hall.floor) => Some(hall),
            (Some(car), _) => Some(Stop::new(car, StopDirection::Any)),
            (None, hall) => hall,
        }
    }
}
