//! Payman Client Error Types

use serde_json::Value;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymanError>;

/// Body of a rejected response: structured when it parses as JSON, raw text
/// otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).map_or_else(|_| ErrorBody::Text(raw.to_string()), ErrorBody::Json)
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorBody::Json(value) => write!(f, "{value}"),
            ErrorBody::Text(text) => f.write_str(text),
        }
    }
}

/// Failures talking to the payment service
#[derive(Error, Debug)]
pub enum PaymanError {
    /// Service answered with a non-success status
    #[error("service returned status {status}: {body}")]
    Rejected { status: u16, body: ErrorBody },

    /// Success status, but the body was not the JSON we expected
    #[error("malformed response body: {raw}")]
    MalformedResponse { raw: String },

    /// Request never completed (DNS, connect, TLS, reading the body...)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
