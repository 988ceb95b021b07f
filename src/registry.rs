use serde::Serialize;

use crate::error::ClaimConflict;
use crate::types::direction::{Direction, ElevatorId, Floor};

/// Hall call state of one floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FloorCall {
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub up_claimed_by: Option<ElevatorId>,
    pub down_claimed_by: Option<ElevatorId>,
}

impl FloorCall {
    pub fn pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up_pressed,
            Direction::Down => self.down_pressed,
        }
    }

    pub fn claimed_by(&self, direction: Direction) -> Option<ElevatorId> {
        match direction {
            Direction::Up => self.up_claimed_by,
            Direction::Down => self.down_claimed_by,
        }
    }

    /// Pending, and either unclaimed or already claimed by `elevator`.
    pub fn claimable_by(&self, direction: Direction, elevator: ElevatorId) -> bool {
        self.pressed(direction)
            && self
                .claimed_by(direction)
                .is_none_or(|holder| holder == elevator)
    }

    fn slots(&mut self, direction: Direction) -> (&mut bool, &mut Option<ElevatorId>) {
        match direction {
            Direction::Up => (&mut self.up_pressed, &mut self.up_claimed_by),
            Direction::Down => (&mut self.down_pressed, &mut self.down_claimed_by),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallRegistry {
    floors: Vec<FloorCall>,
}

impl CallRegistry {
    pub fn new(floor_count: usize) -> Self {
        CallRegistry {
            floors: vec![FloorCall::default(); floor_count],
        }
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn get(&self, floor: Floor) -> Option<&FloorCall> {
        self.floors.get(floor)
    }

    pub fn floors(&self) -> &[FloorCall] {
        &self.floors
    }

    pub fn press(&mut self, floor: Floor, direction: Direction) {
        if let Some(call) = self.floors.get_mut(floor) {
            *call.slots(direction).0 = true;
        }
    }

    /// Checks that `elevator` may claim the call without taking it.
    pub fn check_claim(
        &self,
        floor: Floor,
        direction: Direction,
        elevator: ElevatorId,
    ) -> Result<(), ClaimConflict> {
        match self.get(floor).and_then(|call| call.claimed_by(direction)) {
            Some(holder) if holder != elevator => Err(ClaimConflict {
                elevator,
                floor,
                direction,
                holder,
            }),
            _ => Ok(()),
        }
    }

    pub fn claim(
        &mut self,
        floor: Floor,
        direction: Direction,
        elevator: ElevatorId,
    ) -> Result<(), ClaimConflict> {
        self.check_claim(floor, direction, elevator)?;
        if let Some(call) = self.floors.get_mut(floor) {
            *call.slots(direction).1 = Some(elevator);
        }
        Ok(())
    }

    /// Clears the call if it is pending and held by `elevator`.
    pub fn release(&mut self, floor: Floor, direction: Direction, elevator: ElevatorId) -> bool {
        let Some(call) = self.floors.get_mut(floor) else {
            return false;
        };
        let (pressed, claimed_by) = call.slots(direction);
        if *pressed && *claimed_by == Some(elevator) {
            *pressed = false;
            *claimed_by = None;
            true
        } else {
            false
        }
    }
}
