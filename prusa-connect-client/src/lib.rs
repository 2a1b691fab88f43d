//! # prusa-connect-client
//!
//! Client for the telemetry endpoint exposed by Prusa Connect printers.
//!
//! Each call to [`TelemetryClient::fetch`] performs exactly one
//! `GET <endpoint>/api/telemetry` and decodes the JSON body into a
//! [`TelemetryRecord`]. Nothing is cached or retried; callers decide what a
//! failed fetch means for them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prusa_connect_client::{TelemetryClient, TelemetrySource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelemetryClient::builder()
//!         .endpoint("http://printer.local")
//!         .build()?;
//!
//!     let record = client.fetch().await?;
//!
//!     println!("Nozzle at {} °C", record.nozzle_temperature);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod telemetry;

pub use error::ClientError;
pub use telemetry::{decode_record, TelemetryClient, TelemetryClientBuilder, TelemetrySource};

// Re-export types for convenience
pub use prusa_connect_types::TelemetryRecord;
