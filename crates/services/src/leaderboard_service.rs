use std::sync::Arc;

use data::LeaderboardRepository;
use quiz_core::model::Leaderboard;

use crate::error::LeaderboardServiceError;

/// Facade over leaderboard reads; demo and remote sources swap behind it.
#[derive(Clone)]
pub struct LeaderboardService {
    leaderboard: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(leaderboard: Arc<dyn LeaderboardRepository>) -> Self {
        Self { leaderboard }
    }

    /// One page of the leaderboard (pages are 1-based).
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardServiceError::Data` if the source fails.
    pub async fn page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Leaderboard, LeaderboardServiceError> {
        let board = self.leaderboard.page(page, page_size).await?;
        Ok(board)
    }

    /// The top `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardServiceError::Data` if the source fails.
    pub async fn top(&self, limit: u32) -> Result<Leaderboard, LeaderboardServiceError> {
        let board = self.leaderboard.top(limit).await?;
        Ok(board)
    }

    /// Re-fetch the first page at the default size.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardServiceError::Data` if the source fails.
    pub async fn refresh(&self) -> Result<Leaderboard, LeaderboardServiceError> {
        let board = self.leaderboard.refresh().await?;
        Ok(board)
    }
}
