//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

use crate::error::ConfigError;

#[derive(Debug, Clone, Parser)]
#[command(name = "alert-trigger", about = "Alert trigger demo service", version)]
pub struct Config {
    /// Port to listen on.
    #[arg(long, env = "ALERT_TRIGGER_PORT", default_value = "8080")]
    pub port: u16,

    /// Address to bind.
    #[arg(long, env = "ALERT_TRIGGER_BIND", default_value = "0.0.0.0")]
    pub bind: String,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_8080() {
        let cfg = Config::try_parse_from(["alert-trigger"]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.listen_addr().unwrap(), "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg =
            Config::try_parse_from(["alert-trigger", "--port", "9100", "--bind", "127.0.0.1"])
                .unwrap();
        assert_eq!(cfg.listen_addr().unwrap(), "127.0.0.1:9100".parse().unwrap());
    }

    #[test]
    fn invalid_bind_is_rejected() {
        let cfg = Config {
            port: 8080,
            bind: "not-an-ip".to_string(),
        };
        let err = cfg.listen_addr().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind { .. }));
        assert!(err.to_string().contains("not-an-ip"));
    }
}
