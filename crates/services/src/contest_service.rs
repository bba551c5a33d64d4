use std::sync::Arc;

use tracing::info;

use data::ContestRepository;
use quiz_core::model::{
    Contest, ContestHistoryEntry, ContestId, ContestStatistics, ContestType,
};

use crate::error::ContestServiceError;

/// Facade over the contest catalog for the presentation boundary.
#[derive(Clone)]
pub struct ContestService {
    contests: Arc<dyn ContestRepository>,
}

impl ContestService {
    #[must_use]
    pub fn new(contests: Arc<dyn ContestRepository>) -> Self {
        Self { contests }
    }

    /// List contests, optionally filtered by type.
    ///
    /// # Errors
    ///
    /// Returns `ContestServiceError::Data` if the source fails.
    pub async fn list_contests(
        &self,
        kind: Option<ContestType>,
    ) -> Result<Vec<Contest>, ContestServiceError> {
        let contests = self.contests.list_contests(kind).await?;
        Ok(contests)
    }

    /// Fetch a single contest.
    ///
    /// # Errors
    ///
    /// Returns `ContestServiceError::Data` if the contest is missing or the
    /// source fails.
    pub async fn get_contest(&self, id: &ContestId) -> Result<Contest, ContestServiceError> {
        let contest = self.contests.get_contest(id).await?;
        Ok(contest)
    }

    /// Enroll the caller in a contest.
    ///
    /// # Errors
    ///
    /// Returns `ContestServiceError::Data` if the contest is missing or the
    /// source fails.
    pub async fn enroll(&self, id: &ContestId) -> Result<Contest, ContestServiceError> {
        let contest = self.contests.enroll(id).await?;
        info!(contest = %id, "enrolled");
        Ok(contest)
    }

    /// Previously played contests, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ContestServiceError::Data` if the source fails.
    pub async fn history(&self) -> Result<Vec<ContestHistoryEntry>, ContestServiceError> {
        let history = self.contests.contest_history().await?;
        Ok(history)
    }

    /// Aggregate statistics over the caller's history.
    ///
    /// # Errors
    ///
    /// Returns `ContestServiceError::Data` if the source fails.
    pub async fn statistics(&self) -> Result<ContestStatistics, ContestServiceError> {
        let statistics = self.contests.contest_statistics().await?;
        Ok(statistics)
    }
}
