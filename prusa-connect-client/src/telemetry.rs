//! Telemetry client for the printer's HTTP API.
//!
//! The printer exposes its live state at `/api/telemetry` as a flat JSON
//! object. This module fetches and decodes that document.
//!
//! ## Example
//!
//! ```rust,no_run
//! use prusa_connect_client::{TelemetryClient, TelemetrySource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelemetryClient::builder()
//!         .endpoint("http://192.168.1.20")
//!         .build()?;
//!
//!     let record = client.fetch().await?;
//!     println!("Progress: {}%", record.progress);
//!     println!("Elapsed: {:?}", record.print_duration_secs());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use prusa_connect_types::TelemetryRecord;

use crate::ClientError;

/// Path of the telemetry document, relative to the printer's base address.
pub const TELEMETRY_PATH: &str = "/api/telemetry";

/// Anything that can produce one telemetry snapshot on demand.
///
/// [`TelemetryClient`] is the production implementation; the seam exists so
/// scrape logic can be exercised without a printer.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch a fresh snapshot. Every call is an independent attempt.
    async fn fetch(&self) -> Result<TelemetryRecord, ClientError>;
}

/// Client for a single printer's telemetry endpoint.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    client: Client,
    endpoint: String,
    url: String,
}

impl TelemetryClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> TelemetryClientBuilder {
        TelemetryClientBuilder::default()
    }

    /// The configured base address.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The full URL requested by [`fetch`](TelemetrySource::fetch).
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TelemetrySource for TelemetryClient {
    async fn fetch(&self) -> Result<TelemetryRecord, ClientError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let record = decode_record(&body)?;

        debug!(
            url = %self.url,
            project = %record.project_name,
            "fetched telemetry"
        );

        Ok(record)
    }
}

/// Builder for TelemetryClient.
#[derive(Debug, Default)]
pub struct TelemetryClientBuilder {
    endpoint: Option<String>,
}

impl TelemetryClientBuilder {
    /// Set the printer's base address (e.g., "http://printer.local").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build the client.
    ///
    /// No request timeout is configured; a hung printer holds the request
    /// for as long as the transport allows.
    pub fn build(self) -> Result<TelemetryClient, ClientError> {
        let client = Client::builder().build()?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "http://localhost".to_string());
        let url = telemetry_url(&endpoint);

        Ok(TelemetryClient {
            client,
            endpoint,
            url,
        })
    }
}

fn telemetry_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), TELEMETRY_PATH)
}

/// Decode a telemetry document.
///
/// The body must be a JSON object. Missing keys take their zero value and
/// unknown keys are ignored, but a known key holding a value of the wrong
/// type fails the whole document.
pub fn decode_record(body: &[u8]) -> Result<TelemetryRecord, ClientError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    if !value.is_object() {
        return Err(ClientError::Decode(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }

    Ok(serde_json::from_value(value)?)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
