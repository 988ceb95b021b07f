//! Dispatch core for a bank of elevators: a directional scan with exclusive
//! hall-call claims, driven by host events and answering with commands.

pub mod bank;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod elevator;
pub mod error;
pub mod fleet;
pub mod registry;
pub mod scheduler;
pub mod services;
pub mod strategies;
pub mod types;

pub use bank::Bank;
pub use context::{SchedulerState, Snapshot};
pub use dispatcher::Dispatcher;
pub use error::{ClaimConflict, ClaimPolicy, DispatchError};
pub use fleet::{Fleet, FleetMirror};
pub use scheduler::Rescheduler;
pub use strategies::picker::{ElevatorPicker, FallbackSelector, LocalityPicker, RandomSelector};
pub use strategies::scan::StopFinder;
pub use types::cmd::Command;
pub use types::direction::{Direction, ElevatorId, Floor, Stop, StopDirection};
pub use types::event::Event;
