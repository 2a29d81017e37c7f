use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a model call.
///
/// Cloneable so a failed call can be stored in a reply state and handed to
/// more than one observer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("Authentication failed ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Provider API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model call cancelled")]
    Cancelled,

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl LlmError {
    /// Classify a non-success HTTP status returned by the provider.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Authentication {
                status: status.as_u16(),
                body,
            },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(body),
            _ => Self::Api {
                status: status.as_u16(),
                body,
            },
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::MalformedResponse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;
