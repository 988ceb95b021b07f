use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::Mutex;
use tower::{BoxError, Layer, Service, ServiceExt};

use crate::bank::Bank;
use crate::strategies::picker::ElevatorPicker;
use crate::types::cmd::Command;
use crate::types::event::Event;

/// Runs each event through the shared [`Bank`] and forwards the resulting
/// commands, in order, to the inner service.
///
/// The bank sits behind a single lock, so events are handled one at a time
/// no matter how many clones of the service exist.
pub struct DispatchService<S, P> {
    inner: Arc<Mutex<S>>,
    bank: Arc<Mutex<Bank<P>>>,
}

impl<S, P> DispatchService<S, P> {
    fn new(inner: S, bank: Arc<Mutex<Bank<P>>>) -> Self {
        DispatchService {
            inner: Arc::new(Mutex::new(inner)),
            bank,
        }
    }
}

impl<S, P> Clone for DispatchService<S, P> {
    fn clone(&self) -> Self {
        DispatchService {
            inner: Arc::clone(&self.inner),
            bank: Arc::clone(&self.bank),
        }
    }
}

pub struct DispatchLayer<P> {
    bank: Arc<Mutex<Bank<P>>>,
}

impl<P> DispatchLayer<P> {
    pub fn new(bank: Arc<Mutex<Bank<P>>>) -> Self {
        Self { bank }
    }
}

impl<S, P> Layer<S> for DispatchLayer<P> {
    type Service = DispatchService<S, P>;

    fn layer(&self, inner: S) -> Self::Service {
        DispatchService::new(inner, Arc::clone(&self.bank))
    }
}

impl<S, P> Service<Event> for DispatchService<S, P>
where
    S: Service<Command, Response = ()> + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    P: ElevatorPicker + Send + 'static,
{
    type Response = ();
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, event: Event) -> Self::Future {
        let inner = Arc::clone(&self.inner);
        let bank = Arc::clone(&self.bank);

        Box::pin(async move {
            let commands = bank.lock().await.on_event(&event)?;
            let mut svc = inner.lock().await;
            for command in commands {
                svc.ready().await.map_err(Into::into)?;
                svc.call(command).await.map_err(Into::into)?;
            }
            Ok(())
        })
    }
}
