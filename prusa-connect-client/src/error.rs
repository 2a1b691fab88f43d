//! Error types for the telemetry client.

use thiserror::Error;

/// Errors that can occur when fetching telemetry from a printer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The printer answered with a non-success status code.
    #[error("Telemetry endpoint returned status {0}")]
    Status(u16),

    /// The response body is not a telemetry document.
    #[error("Failed to decode telemetry: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl ClientError {
    /// Whether the HTTP exchange itself failed, as opposed to its payload.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::Connection(_) | ClientError::Status(_)
        )
    }

    /// Whether a response arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // No request timeout is set; transport timeouts land in `Http`.
        if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else if err.is_builder() {
            ClientError::Build(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
