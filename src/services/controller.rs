use anyhow::Context as _;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::net::UdpSocket;
use tokio::sync::mpsc::UnboundedSender;
use tower::Service;
use tracing::debug;

use crate::types::cmd::Command;

/// Where commands for the host end up.
#[async_trait]
pub trait CommandSink: Send + Sync + 'static {
    async fn send(&self, command: Command) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct UdpSink {
    socket: Arc<UdpSocket>,
    address: SocketAddr,
}

impl UdpSink {
    pub fn new(socket: Arc<UdpSocket>, address: SocketAddr) -> Self {
        UdpSink { socket, address }
    }
}

#[async_trait]
impl CommandSink for UdpSink {
    async fn send(&self, command: Command) -> anyhow::Result<()> {
        self.socket
            .send_to(command.to_string().as_bytes(), self.address)
            .await
            .with_context(|| format!("failed to send command {command} to {}", self.address))?;
        Ok(())
    }
}

#[async_trait]
impl CommandSink for UnboundedSender<Command> {
    async fn send(&self, command: Command) -> anyhow::Result<()> {
        UnboundedSender::send(self, command)
            .map_err(|err| anyhow::anyhow!("command channel closed, dropped {}", err.0))
    }
}

pub struct ControllerService<K> {
    sink: Arc<K>,
}

impl<K> ControllerService<K> {
    pub fn new(sink: K) -> Self {
        ControllerService {
            sink: Arc::new(sink),
        }
    }
}

impl<K> Clone for ControllerService<K> {
    fn clone(&self) -> Self {
        ControllerService {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<K: CommandSink> Service<Command> for ControllerService<K> {
    type Response = ();
    type Error = anyhow::Error;
    type Future = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, command: Command) -> Self::Future {
        let sink = Arc::clone(&self.sink);
        Box::pin(async move {
            debug!(%command, elevator = command.elevator(), "sending command");
            sink.send(command).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::direction::Direction;
    use tower::ServiceExt;

    #[tokio::test]
    async fn forwards_commands_to_channel() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut controller = ControllerService::new(tx);
        controller
            .ready()
            .await
            .unwrap()
            .call(Command::indicate(1, Direction::Down))
            .await
            .unwrap();
        assert_eq!(rx.recv().await, Some(Command::indicate(1, Direction::Down)));
    }

    #[tokio::test]
    async fn closed_channel_is_an_error() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let mut controller = ControllerService::new(tx);
        assert!(controller.call(Command::move_now(0, 1)).await.is_err());
    }
}
