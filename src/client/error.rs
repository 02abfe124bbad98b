//! GitHub client error types

use compact_str::CompactString;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the transport adapter.
///
/// Every failure is a value returned to the caller; nothing is retried and
/// nothing is treated as fatal to the process.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or DNS failure before an HTTP response arrived
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned a non-success status
    #[error("GitHub API error (HTTP {status}): {message}")]
    Api { status: u16, message: CompactString },

    /// The response body did not match the expected schema
    #[error("failed to decode response from {endpoint}: {message}")]
    Decode {
        endpoint: CompactString,
        message: CompactString,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid client setup (e.g. malformed base URL)
    #[error("invalid configuration: {0}")]
    Config(CompactString),
}

impl ClientError {
    /// Create an API error from a status code and upstream message
    pub fn api(status: u16, message: impl Into<CompactString>) -> Self {
        Self::Api { status, message: message.into() }
    }

    /// Create a decoding error for an endpoint
    pub fn decode(endpoint: impl Into<CompactString>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: source.to_string().into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<CompactString>) -> Self {
        Self::Config(message.into())
    }

    /// The HTTP status code, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
