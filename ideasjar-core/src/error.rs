//! Structured error types for ideasjar-core.
//!
//! Uses `thiserror` so callers can distinguish transport, status and decode
//! failures. The CLI wraps these in `anyhow`.

use std::io;
use std::path::PathBuf;

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Main error type for ideasjar-core operations
#[derive(Error, Debug)]
pub enum IdeasError {
    /// Request never completed (DNS, connect, TLS, reset...)
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status
    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    /// Success response whose body could not be decoded
    #[error("Failed to decode response from {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base endpoint is unusable
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// I/O operation failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for ideasjar-core operations
pub type Result<T> = std::result::Result<T, IdeasError>;

impl IdeasError {
    /// Create a transport error for `url`
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Create a status error
    pub fn status(method: Method, url: impl Into<String>, status: StatusCode) -> Self {
        Self::Status {
            method,
            url: url.into(),
            status,
        }
    }

    /// Create a decode error with context
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// HTTP status for `Status` errors
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}
