use serde::Serialize;
use std::fmt;
use std::fmt::Display;

pub type ElevatorId = usize;
pub type Floor = usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Direction tag carried by a stop. Car requests are served in whichever
/// direction the car happens to be going, so they are tagged `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopDirection {
    Up,
    Down,
    Any,
}

impl StopDirection {
    pub fn call(self) -> Option<Direction> {
        match self {
            StopDirection::Up => Some(Direction::Up),
            StopDirection::Down => Some(Direction::Down),
            StopDirection::Any => None,
        }
    }
}

impl From<Direction> for StopDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => StopDirection::Up,
            Direction::Down => StopDirection::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub floor: Floor,
    pub dir: StopDirection,
}

impl Stop {
    pub fn new(floor: Floor, dir: StopDirection) -> Self {
        Stop { floor, dir }
    }
}
