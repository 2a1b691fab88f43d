use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prusa_connect_client::TelemetryClient;
use prusa_connect_exporter::{server, ExporterConfig, TelemetryCollector};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ExporterConfig::parse();
    config.validate().context("invalid configuration")?;

    info!("Starting prusa-connect-exporter");

    let client = TelemetryClient::builder()
        .endpoint(config.host.clone())
        .build()
        .context("failed to create telemetry client")?;
    let collector = Arc::new(TelemetryCollector::new(client));

    let listener = server::bind(config.listen_addr()).await?;
    info!(
        addr = %config.listen_addr(),
        path = %config.path,
        upstream = %collector.source().url(),
        "serving metrics"
    );

    tokio::select! {
        result = server::serve(listener, collector, config.path.clone()) => {
            result.context("unable to run the metrics server")
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}
