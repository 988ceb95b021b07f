use std::fmt;
use std::fmt::Display;

use crate::types::direction::{Direction, ElevatorId, Floor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo {
        elevator: ElevatorId,
        floor: Floor,
        immediate: bool,
    },
    SetIndicators {
        elevator: ElevatorId,
        up: bool,
        down: bool,
    },
}

impl Command {
    pub fn move_now(elevator: ElevatorId, floor: Floor) -> Self {
        Command::MoveTo {
            elevator,
            floor,
            immediate: true,
        }
    }

    /// Lamps showing travel in `direction`.
    pub fn indicate(elevator: ElevatorId, direction: Direction) -> Self {
        Command::SetIndicators {
            elevator,
            up: direction == Direction::Up,
            down: direction == Direction::Down,
        }
    }

    pub fn elevator(&self) -> ElevatorId {
        match self {
            Command::MoveTo { elevator, .. } | Command::SetIndicators { elevator, .. } => *elevator,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::MoveTo {
                elevator,
                floor,
                immediate: true,
            } => write!(f, "G{elevator}:{floor}"),
            Command::MoveTo {
                elevator,
                floor,
                immediate: false,
            } => write!(f, "Q{elevator}:{floor}"),
            Command::SetIndicators { elevator, up, down } => {
                write!(f, "L{elevator}:{}{}", u8::from(*up), u8::from(*down))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_wire_format() {
        assert_eq!(Command::move_now(1, 4).to_string(), "G1:4");
        assert_eq!(
            Command::MoveTo {
                elevator: 0,
                floor: 2,
                immediate: false
            }
            .to_string(),
            "Q0:2"
        );
        assert_eq!(Command::indicate(2, Direction::Down).to_string(), "L2:01");
        assert_eq!(Command::indicate(0, Direction::Up).to_string(), "L0:10");
    }
}
