//! Error types for the finance frontend

use thiserror::Error;

/// A single request could not be built, sent, or was answered with a failing status.
///
/// Every variant reaches the request callback; none escapes as a panic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid request field {key:?}")]
    InvalidField { key: String },

    #[error("failed to build request: {0}")]
    Build(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with status {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },
}

/// Outcome of a resource call once the response envelope is interpreted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] RequestError),

    /// The server answered `success: false`
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Startup faults of a page controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    #[error("page container element is missing")]
    MissingContainer,

    #[error("required element {selector:?} is missing")]
    MissingElement { selector: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid log level {0:?}")]
    LogLevel(String),
}
