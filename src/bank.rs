use tracing::trace;

use crate::context::Snapshot;
use crate::dispatcher::Dispatcher;
use crate::error::{ClaimPolicy, DispatchError};
use crate::fleet::FleetMirror;
use crate::strategies::picker::{ElevatorPicker, LocalityPicker};
use crate::types::cmd::Command;
use crate::types::direction::Floor;
use crate::types::event::Event;

/// A dispatcher driving a remote host, with the host's car state mirrored
/// from the same event stream.
#[derive(Debug)]
pub struct Bank<P = LocalityPicker> {
    fleet: FleetMirror,
    dispatcher: Dispatcher<P>,
}

impl<P: ElevatorPicker> Bank<P> {
    pub fn new(
        elevator_count: usize,
        floor_count: usize,
        starting_floor: Floor,
        picker: P,
        policy: ClaimPolicy,
    ) -> Self {
        let fleet = FleetMirror::new(elevator_count, starting_floor);
        let dispatcher = Dispatcher::new(&fleet, floor_count, picker, policy);
        Bank { fleet, dispatcher }
    }

    pub fn startup_commands(&self) -> Vec<Command> {
        self.dispatcher.startup_commands()
    }

    pub fn on_event(&mut self, event: &Event) -> Result<Vec<Command>, DispatchError> {
        self.fleet.observe(event);
        let commands = self.dispatcher.handle(&self.fleet, event)?;
        if tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(&self.dispatcher.snapshot()) {
                Ok(json) => trace!(snapshot = %json, "state after {event:?}"),
                Err(err) => trace!(%err, "snapshot not serializable"),
            }
        }
        Ok(commands)
    }

    pub fn fleet(&self) -> &FleetMirror {
        &self.fleet
    }

    pub fn dispatcher(&self) -> &Dispatcher<P> {
        &self.dispatcher
    }

    pub fn snapshot(&self) -> Snapshot {
        self.dispatcher.snapshot()
    }
}
