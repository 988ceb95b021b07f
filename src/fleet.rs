use std::collections::BTreeSet;

use crate::types::direction::{ElevatorId, Floor};
use crate::types::event::Event;

/// What the dispatcher may ask of the elevators it drives.
pub trait Fleet {
    fn elevator_count(&self) -> usize;
    fn current_floor(&self, elevator: ElevatorId) -> Floor;
    /// Floors requested from inside the car.
    fn pending_car_requests(&self, elevator: ElevatorId) -> BTreeSet<Floor>;
}

#[derive(Debug, Clone, Default)]
struct CarView {
    floor: Floor,
    requests: BTreeSet<Floor>,
}

/// A [`Fleet`] rebuilt from the event stream of a remote host.
#[derive(Debug, Clone)]
pub struct FleetMirror {
    cars: Vec<CarView>,
}

impl FleetMirror {
    pub fn new(elevator_count: usize, starting_floor: Floor) -> Self {
        FleetMirror {
            cars: vec![
                CarView {
                    floor: starting_floor,
                    ..CarView::default()
                };
                elevator_count
            ],
        }
    }

    pub fn observe(&mut self, event: &Event) {
        match *event {
            Event::CarRequestMade { elevator, floor } => {
                if let Some(car) = self.cars.get_mut(elevator) {
                    car.requests.insert(floor);
                }
            }
            Event::FloorPassed { elevator, floor } => {
                if let Some(car) = self.cars.get_mut(elevator) {
                    car.floor = floor;
                }
            }
            Event::ArrivedAtFloor { elevator, floor } => {
                if let Some(car) = self.cars.get_mut(elevator) {
                    car.floor = floor;
                    car.requests.remove(&floor);
                }
            }
            Event::Idle { .. } | Event::HallCallMade { .. } => {}
        }
    }
}

impl Fleet for FleetMirror {
    fn elevator_count(&self) -> usize {
        self.cars.len()
    }

    fn current_floor(&self, elevator: ElevatorId) -> Floor {
        self.cars.get(elevator).map_or(0, |car| car.floor)
    }

    fn pending_car_requests(&self, elevator: ElevatorId) -> BTreeSet<Floor> {
        self.cars
            .get(elevator)
            .map(|car| car.requests.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_tracks_floor_and_requests() {
        let mut fleet = FleetMirror::new(2, 0);
        fleet.observe(&Event::CarRequestMade { elevator: 1, floor: 4 });
        fleet.observe(&Event::CarRequestMade { elevator: 1, floor: 2 });
        fleet.observe(&Event::FloorPassed { elevator: 1, floor: 1 });
        assert_eq!(fleet.current_floor(1), 1);
        assert_eq!(fleet.pending_car_requests(1), BTreeSet::from([2, 4]));

        fleet.observe(&Event::ArrivedAtFloor { elevator: 1, floor: 2 });
        assert_eq!(fleet.current_floor(1), 2);
        assert_eq!(fleet.pending_car_requests(1), BTreeSet::from([4]));
        assert!(fleet.pending_car_requests(0).is_empty());
    }
}
