//! # prusa-connect-types
//!
//! Core types shared by the Prusa Connect exporter crates.
//!
//! ## Contents
//!
//! - [`TelemetryRecord`]: one snapshot decoded from the printer's
//!   `/api/telemetry` endpoint
//! - [`parse_duration`]: parser for the printer's human readable durations
//!   (`"1h 30m 5s"`), returning whole [`Seconds`]
//! - [`MetricDescriptor`] and [`MetricSample`]: the static metadata and the
//!   per-scrape values handed to the exposition layer
//!
//! ## Features
//!
//! - `serde`: derive `Deserialize`/`Serialize` for [`TelemetryRecord`]
//!
//! ## Example
//!
//! ```rust
//! use prusa_connect_types::{parse_duration, Seconds};
//!
//! let elapsed = parse_duration("2h 5m").unwrap();
//! assert_eq!(elapsed, Seconds::from_secs(7500));
//! ```

mod duration;
mod metrics;
mod telemetry;

pub use duration::*;
pub use metrics::*;
pub use telemetry::*;
