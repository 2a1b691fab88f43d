//! Command line and environment configuration.

use std::net::{Ipv4Addr, SocketAddr};

use clap::Parser;
use thiserror::Error;

/// Configuration rejected at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("printer address must not be empty")]
    EmptyHost,

    #[error("metrics path must start with '/', got {0:?}")]
    InvalidPath(String),
}

/// Exporter settings. Each flag falls back to an environment variable.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "prusa-connect-exporter")]
#[command(version, about = "Prometheus exporter for Prusa Connect printer telemetry")]
pub struct ExporterConfig {
    /// Base address of the printer, e.g. http://192.168.1.20
    #[arg(long, env = "PRUSA_CONNECT_HOST")]
    pub host: String,

    /// Port to serve metrics on
    #[arg(long, env = "PRUSA_CONNECT_EXPORTER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path to serve metrics on
    #[arg(long, env = "PRUSA_CONNECT_EXPORTER_PATH", default_value = "/metrics")]
    pub path: String,
}

impl ExporterConfig {
    /// Check values clap cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }

    /// Address the metrics server listens on (all interfaces).
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
