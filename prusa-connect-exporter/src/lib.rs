//! # prusa-connect-exporter
//!
//! Prometheus exporter for Prusa Connect printers.
//!
//! On every scrape the exporter fetches one telemetry document from the
//! printer, translates it into gauges and answers with the Prometheus text
//! exposition format. Nothing is cached between scrapes: when the printer is
//! unreachable the scrape succeeds with an empty body, and a malformed
//! duration or estimate only drops that one gauge.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use prusa_connect_client::TelemetryClient;
//! use prusa_connect_exporter::{server, TelemetryCollector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelemetryClient::builder()
//!         .endpoint("http://printer.local")
//!         .build()?;
//!     let collector = Arc::new(TelemetryCollector::new(client));
//!
//!     let listener = server::bind("0.0.0.0:8080".parse()?).await?;
//!     server::serve(listener, collector, "/metrics".to_string()).await?;
//!
//!     // Metrics available at http://localhost:8080/metrics
//!     Ok(())
//! }
//! ```
//!
//! ## Metrics
//!
//! | name | source field |
//! |---|---|
//! | `prusa_connect_temp_nozzle` | `temp_nozzle` |
//! | `prusa_connect_temp_bed` | `temp_bed` |
//! | `prusa_connect_z_pozition` | `pos_z_mm` |
//! | `prusa_connect_printing_speed` | `printing_speed` |
//! | `prusa_connect_flow_factor` | `flow_factor` |
//! | `prusa_connect_progress` | `progress` |
//! | `prusa_connect_print_duration` | `print_dur`, parsed to seconds |
//! | `prusa_connect_time_estimated` | `time_est`, parsed as a number |

mod collector;
pub mod config;
pub mod render;
pub mod server;
mod translate;

pub use collector::{MetricSink, Samples, TelemetryCollector};
pub use config::{ConfigError, ExporterConfig};
pub use translate::{samples, translate, Metric, METRICS};

// Re-export types for convenience
pub use prusa_connect_types::{MetricDescriptor, MetricKind, MetricSample, TelemetryRecord};
