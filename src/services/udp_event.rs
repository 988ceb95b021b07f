use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};
use tracing::{debug, warn};

use crate::types::event::Event;

/// Decodes one host datagram into an [`Event`] for the inner service.
/// Datagrams that don't decode are logged and answered with `Ok(())`.
#[derive(Debug, Clone)]
pub struct UdpEventService<S> {
    inner: S,
}

impl<S> Service<&[u8]> for UdpEventService<S>
where
    S: Service<Event, Response = ()>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
{
    type Response = ();
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, raw: &[u8]) -> Self::Future {
        match Event::try_from(raw) {
            Ok(ev) => {
                debug!(event = ?ev, "event received");
                let fut = self.inner.call(ev);
                Box::pin(async move { fut.await.map_err(Into::into) })
            }
            Err(e) => {
                warn!(
                    error = %e,
                    packet = %String::from_utf8_lossy(raw),
                    "dropping invalid packet"
                );
                Box::pin(async { Ok(()) })
            }
        }
    }
}

pub struct UdpEventLayer;

impl<S> Layer<S> for UdpEventLayer {
    type Service = UdpEventService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        UdpEventService { inner }
    }
}
