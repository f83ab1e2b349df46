use std::fmt;

use shared::error::ApiErrorBody;
use thiserror::Error;

/// Why a backend call did not produce a usable payload.
#[derive(Debug, Clone, Error)]
pub enum RequestFailure {
    #[error("backend responded with HTTP {status}")]
    Status {
        status: u16,
        body: Option<ApiErrorBody>,
    },
    #[error("request did not reach the backend: {0}")]
    Transport(String),
    #[error("backend response could not be decoded: {0}")]
    Decode(String),
}

impl RequestFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                body: Some(body), ..
            } => body.message(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP 401; the user has to sign in through the marketplace.
    Unauthorized,
    /// Non-2xx response carrying a backend message.
    Backend,
    /// No usable response at all.
    Transport,
    /// The request succeeded but returned nothing to show.
    Empty,
}

/// Display-ready error for a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    kind: ErrorKind,
    message: String,
}

impl ErrorMessage {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Soft errors come from successful requests with empty payloads.
    pub fn is_soft(&self) -> bool {
        self.kind == ErrorKind::Empty
    }

    pub fn requires_reauth(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
