//! In-memory data sources standing in for the real backend.
//!
//! Every call sleeps a configurable simulated latency so the calling code
//! exercises the same async paths a network client would; tests use
//! [`Latency::none`].

mod contest;
mod leaderboard;

use std::time::Duration;

pub use contest::DemoContestSource;
pub use leaderboard::DemoLeaderboard;

/// Simulated network latency for demo sources.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    /// Delay for list-shaped and session calls.
    pub list: Duration,
    /// Delay for single-item reads.
    pub item: Duration,
}

impl Latency {
    /// The delays the demo backend ships with.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            list: Duration::from_millis(500),
            item: Duration::from_millis(300),
        }
    }

    /// Zero delay, for tests.
    #[must_use]
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            item: Duration::ZERO,
        }
    }
}

async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
