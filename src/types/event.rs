use anyhow::Context;
use std::convert::TryFrom;

use crate::types::direction::{Direction, ElevatorId, Floor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CarRequestMade { elevator: ElevatorId, floor: Floor },
    FloorPassed { elevator: ElevatorId, floor: Floor },
    ArrivedAtFloor { elevator: ElevatorId, floor: Floor },
    Idle { elevator: ElevatorId },
    HallCallMade { floor: Floor, direction: Direction },
}

impl Event {
    pub fn elevator(&self) -> Option<ElevatorId> {
        match self {
            Event::CarRequestMade { elevator, .. }
            | Event::FloorPassed { elevator, .. }
            | Event::ArrivedAtFloor { elevator, .. }
            | Event::Idle { elevator } => Some(*elevator),
            Event::HallCallMade { .. } => None,
        }
    }

    pub fn floor(&self) -> Option<Floor> {
        match self {
            Event::CarRequestMade { floor, .. }
            | Event::FloorPassed { floor, .. }
            | Event::ArrivedAtFloor { floor, .. }
            | Event::HallCallMade { floor, .. } => Some(*floor),
            Event::Idle { .. } => None,
        }
    }
}

fn parse_index(raw: &str) -> anyhow::Result<usize> {
    raw.parse::<usize>()
        .context(format!("failed to parse '{raw}' as an index"))
}

fn parse_pair(raw: &str) -> anyhow::Result<(ElevatorId, Floor)> {
    let (elevator, floor) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("expected '<elevator>:<floor>', got '{raw}'"))?;
    Ok((parse_index(elevator)?, parse_index(floor)?))
}

/// Parses one datagram from the host, e.g. `S1:4` or `U3`.
impl TryFrom<&[u8]> for Event {
    type Error = anyhow::Error;

    fn try_from(value: &[u8]) -> anyhow::Result<Self> {
        if value.len() < 2 {
            anyhow::bail!(
                "buffer too short: expected at least 2 bytes, got {}",
                value.len()
            );
        }

        let cmd = value[0];
        let args = str::from_utf8(&value[1..])
            .context("argument is not valid UTF-8")?
            .trim();

        match cmd {
            b'P' => {
                let (elevator, floor) = parse_pair(args)?;
                Ok(Event::CarRequestMade { elevator, floor })
            }
            b'F' => {
                let (elevator, floor) = parse_pair(args)?;
                Ok(Event::FloorPassed { elevator, floor })
            }
            b'S' => {
                let (elevator, floor) = parse_pair(args)?;
                Ok(Event::ArrivedAtFloor { elevator, floor })
            }
            b'I' => Ok(Event::Idle {
                elevator: parse_index(args)?,
            }),
            b'U' => Ok(Event::HallCallMade {
                floor: parse_index(args)?,
                direction: Direction::Up,
            }),
            b'D' => Ok(Event::HallCallMade {
                floor: parse_index(args)?,
                direction: Direction::Down,
            }),
            other => anyhow::bail!("unknown event byte: {}", other),
        }
    }
}
