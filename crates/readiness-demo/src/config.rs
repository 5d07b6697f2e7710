//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

#[derive(Debug, Clone, Parser)]
#[command(name = "readiness-demo", about = "Slow-starting readiness demo service", version)]
pub struct Config {
    /// Port to listen on.
    #[arg(long, env = "READINESS_DEMO_PORT", default_value = "8080")]
    pub port: u16,

    /// Address to bind.
    #[arg(long, env = "READINESS_DEMO_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Seconds to wait before reporting ready.
    #[arg(long = "ready-delay", env = "READINESS_DEMO_DELAY_SECS", default_value = "60")]
    pub ready_delay_secs: u64,
}

impl Config {
    /// Socket address the server listens on.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidBind {
                addr: self.bind.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_secs(self.ready_delay_secs)
    }
}
