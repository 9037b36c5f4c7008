// src/error.rs
use thiserror::Error;

use crate::validation::ValidationError;

/// Every failure a PowerDNS API call can report.
///
/// HTTP failures keep the status code and raw response body so callers can
/// branch on them without parsing the message text.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("conflict (409): {url}: {body}")]
    Conflict { url: String, body: String },

    #[error("unexpected status code {status}: {url} {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("operation canceled")]
    Canceled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("invalid request input: {0}")]
    Encoding(#[from] ValidationError),

    #[error("metadata kind is read-only via HTTP metadata endpoint")]
    ReadOnlyKind,

    #[error("metadata kind is not settable via HTTP metadata; use the Zones API")]
    NotViaHttp,

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("json payload error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Map a non-2xx response onto the matching variant.
    pub(crate) fn from_status(status: u16, url: impl Into<String>, body: String) -> Self {
        let url = url.into();
        match status {
            404 => Error::NotFound { url },
            409 => Error::Conflict { url, body },
            _ => Error::UnexpectedStatus { status, url, body },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// True for both explicit cancellation and an elapsed deadline.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Canceled | Error::DeadlineExceeded)
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::NotFound { .. } => Some(404),
            Error::Conflict { .. } => Some(409),
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
