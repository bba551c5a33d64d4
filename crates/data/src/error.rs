use std::fmt;

use thiserror::Error;

/// Errors surfaced by data sources (demo or remote).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataError {
    #[error("not found")]
    NotFound,

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid payload: {0}")]
    Invalid(String),
}

impl DataError {
    /// Wrap a mapping/validation failure as `DataError::Invalid`.
    #[must_use]
    pub fn invalid(err: impl fmt::Display) -> Self {
        Self::Invalid(err.to_string())
    }
}
