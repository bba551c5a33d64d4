#![forbid(unsafe_code)]

//! Service layer for the quiz contest engine: the session state machine and
//! its async runner, plus facades over the contest catalog and leaderboard.

pub mod contest_service;
pub mod error;
pub mod leaderboard_service;
pub mod session;

pub use quiz_core::Clock;

pub use contest_service::ContestService;
pub use error::{ContestServiceError, LeaderboardServiceError, SessionError};
pub use leaderboard_service::LeaderboardService;
pub use session::{
    SessionCommand, SessionEngine, SessionFlow, SessionHandle, SessionRunner, SessionSnapshot,
    SessionUpdate,
};
