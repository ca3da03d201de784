//! The error taxonomy, mapped to HTTP status codes at the transport
//! boundary (see `crate::http::commands`). A closed enum with a
//! machine-readable `kind()` and human-readable `recovery()` guidance per
//! variant.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, Serialize)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
pub enum GameError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("precondition failed: {0}")]
    Preconditions(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// Short machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::Preconditions(_) => "preconditions",
            Self::Conflict(_) => "conflict",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Human-readable recovery guidance for the client.
    #[must_use]
    pub const fn recovery(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "client re-creates or re-joins",
            Self::Forbidden(_) => "surface to user, no retry",
            Self::Preconditions(_) => "client refreshes state, may retry",
            Self::Conflict(_) => "client refreshes and retries",
            Self::InvalidInput(_) => "surface to user, do not retry",
            Self::Internal(_) => "retry with backoff",
        }
    }
}
