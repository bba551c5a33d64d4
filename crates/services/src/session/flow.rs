use std::sync::Arc;
use std::time::Duration;

use data::ContestRepository;
use quiz_core::Clock;
use quiz_core::model::ContestId;

use crate::error::SessionError;

use super::engine::SessionEngine;
use super::runner::{SessionHandle, SessionRunner};

/// Starts contest attempts: loads the payload, builds the engine, and spawns
/// the runner.
#[derive(Clone)]
pub struct SessionFlow {
    contests: Arc<dyn ContestRepository>,
    clock: Clock,
    tick_period: Duration,
}

impl SessionFlow {
    #[must_use]
    pub fn new(contests: Arc<dyn ContestRepository>, clock: Clock) -> Self {
        Self {
            contests,
            clock,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Override the countdown step for every session this flow starts.
    #[must_use]
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Begin an attempt at the given contest.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Data` if the payload cannot be loaded and
    /// `SessionError::EmptySession` if it carries no questions.
    pub async fn begin(&self, contest_id: &ContestId) -> Result<SessionHandle, SessionError> {
        let payload = self.contests.start_session(contest_id).await?;
        let engine = SessionEngine::start(payload, self.clock.now())?;
        let runner = SessionRunner::new(Arc::clone(&self.contests), self.clock)
            .with_tick_period(self.tick_period);
        Ok(runner.spawn(engine))
    }
}
