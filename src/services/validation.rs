use tower::BoxError;
use tower::filter::Predicate;
use tracing::warn;

use crate::types::event::Event;

/// Rejects events naming an elevator or floor the bank doesn't have.
#[derive(Debug, Clone, Copy)]
pub struct Validation {
    elevators: usize,
    floors: usize,
}

impl Validation {
    pub fn new(elevators: usize, floors: usize) -> Self {
        Validation { elevators, floors }
    }

    fn valid(&self, event: &Event) -> bool {
        event.elevator().is_none_or(|e| e < self.elevators)
            && event.floor().is_none_or(|f| f < self.floors)
    }
}

impl Predicate<Event> for Validation {
    type Request = Event;

    fn check(&mut self, event: Event) -> Result<Self::Request, BoxError> {
        if !self.valid(&event) {
            warn!(?event, "invalid event");
            return Err(BoxError::from("invalid event"));
        }
        Ok(event)
    }
}
