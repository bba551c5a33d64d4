//! Shared error types for the services crate.

use thiserror::Error;

use data::DataError;

/// Errors emitted by the session engine and flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// Starting a session whose payload carries no questions.
    #[error("session has no questions")]
    EmptySession,
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Errors emitted by `ContestService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContestServiceError {
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardServiceError {
    #[error(transparent)]
    Data(#[from] DataError),
}
