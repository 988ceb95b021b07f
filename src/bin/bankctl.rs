use anyhow::Context;
use clap::Parser;
use elevator_dispatch::config::{Config, UDP_MAX_SIZE};
use elevator_dispatch::services::controller::{ControllerService, UdpSink};
use elevator_dispatch::services::dispatch::DispatchLayer;
use elevator_dispatch::services::udp_event::UdpEventLayer;
use elevator_dispatch::services::validation::Validation;
use elevator_dispatch::{Bank, DispatchError, LocalityPicker, RandomSelector};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tower::{Service, ServiceBuilder, ServiceExt};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config.log_level)?;

    let socket = UdpSocket::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    let shared_socket = Arc::new(socket);
    info!(
        listen = %config.listen,
        host = %config.host,
        elevators = config.elevators,
        floors = config.floors,
        claim_policy = ?config.claim_policy(),
        "bank controller listening"
    );

    let bank = Bank::new(
        config.elevators,
        config.floors,
        config.start_floor,
        LocalityPicker::new(RandomSelector::default()),
        config.claim_policy(),
    );
    let mut controller = ControllerService::new(UdpSink::new(shared_socket.clone(), config.host));
    for command in bank.startup_commands() {
        controller.ready().await?.call(command).await?;
    }
    info!("elevator bank initialized");

    let mut svc = ServiceBuilder::new()
        .layer(UdpEventLayer)
        .filter(Validation::new(config.elevators, config.floors))
        .layer(DispatchLayer::new(Arc::new(Mutex::new(bank))))
        .service(controller);

    let mut buf = vec![0u8; UDP_MAX_SIZE];
    loop {
        let (len, addr) = shared_socket.recv_from(&mut buf).await?;
        debug!(%addr, len, "got udp packet");

        let raw = &buf[..len];
        ServiceExt::<&[u8]>::ready(&mut svc)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        if let Err(err) = svc.call(raw).await {
            if let Some(fatal) = err.downcast_ref::<DispatchError>() {
                error!(error = %fatal, "dispatch invariant violated, shutting down");
                return Err(fatal.clone().into());
            }
            warn!(error = %err, "service error");
        }
    }
}
