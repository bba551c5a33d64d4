use async_trait::async_trait;

use quiz_core::model::{
    AnswerMap, Contest, ContestHistoryEntry, ContestId, ContestStatistics, ContestType,
    Leaderboard, QuizSession, SessionResult,
};

use crate::error::DataError;

/// Default page size for leaderboard reads.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Contract for the contest catalog and session lifecycle.
///
/// Services hold this as `Arc<dyn ContestRepository>`; the demo source and a
/// real backend client are interchangeable behind it.
#[async_trait]
pub trait ContestRepository: Send + Sync {
    /// List catalog contests, optionally filtered by type.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the source fails.
    async fn list_contests(&self, kind: Option<ContestType>) -> Result<Vec<Contest>, DataError>;

    /// Fetch a single contest.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if the contest does not exist.
    async fn get_contest(&self, id: &ContestId) -> Result<Contest, DataError>;

    /// Enroll the caller in a contest, returning the updated entry.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if the contest does not exist.
    async fn enroll(&self, id: &ContestId) -> Result<Contest, DataError>;

    /// Load the question payload for a new attempt at the contest.
    ///
    /// # Errors
    ///
    /// Returns `DataError::NotFound` if the contest does not exist, or
    /// `DataError::Invalid` if the payload fails validation.
    async fn start_session(&self, id: &ContestId) -> Result<QuizSession, DataError>;

    /// Submit a finished attempt for scoring and ranking.
    ///
    /// Rank and participant totals in the returned result are computed by the
    /// source, never by the caller.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the source fails or the result is inconsistent.
    async fn complete_session(
        &self,
        id: &ContestId,
        answers: &AnswerMap,
        time_taken_secs: u64,
    ) -> Result<SessionResult, DataError>;

    /// Previously played contests, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the source fails.
    async fn contest_history(&self) -> Result<Vec<ContestHistoryEntry>, DataError>;

    /// Aggregate statistics over the caller's history.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the source fails.
    async fn contest_statistics(&self) -> Result<ContestStatistics, DataError>;
}

/// Contract for ranked leaderboard reads.
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// One page of the leaderboard (pages are 1-based).
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the source fails.
    async fn page(&self, page: u32, page_size: u32) -> Result<Leaderboard, DataError>;

    /// The top `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the source fails.
    async fn top(&self, limit: u32) -> Result<Leaderboard, DataError>;

    /// Re-fetch the first page at the default size.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the source fails.
    async fn refresh(&self) -> Result<Leaderboard, DataError> {
        self.page(1, DEFAULT_PAGE_SIZE).await
    }
}
