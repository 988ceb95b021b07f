use std::net::SocketAddr;

use clap::Parser;

use crate::error::ClaimPolicy;
use crate::types::direction::Floor;

pub const CONTROL_ADDRESS: &str = "127.0.0.1:11000";
pub const HOST_ADDRESS: &str = "127.0.0.1:10000";

pub const UDP_MAX_SIZE: usize = 65535;

#[derive(Debug, Clone, Parser)]
#[command(name = "bankctl", version, about = "Dispatch controller for a bank of elevators")]
pub struct Config {
    /// Number of elevators in the bank
    #[arg(short, long, default_value_t = 2)]
    pub elevators: usize,

    /// Number of floors, numbered from 0
    #[arg(short, long, default_value_t = 6)]
    pub floors: usize,

    /// Floor every car is parked at when the controller starts
    #[arg(long, default_value_t = 0)]
    pub start_floor: Floor,

    /// Address the controller listens on for host events
    #[arg(long, default_value = CONTROL_ADDRESS)]
    pub listen: SocketAddr,

    /// Address of the host receiving commands
    #[arg(long, default_value = HOST_ADDRESS)]
    pub host: SocketAddr,

    /// Reaction to a conflicting claim; strict in debug builds, lenient in release
    #[arg(long, value_enum)]
    pub claim_policy: Option<ClaimPolicy>,

    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn claim_policy(&self) -> ClaimPolicy {
        self.claim_policy.unwrap_or_default()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.elevators == 0 {
            anyhow::bail!("a bank needs at least one elevator");
        }
        if self.floors == 0 {
            anyhow::bail!("a bank needs at least one floor");
        }
        if self.start_floor >= self.floors {
            anyhow::bail!(
                "start floor {} is outside a {}-floor building",
                self.start_floor,
                self.floors
            );
        }
        Ok(())
    }
}
