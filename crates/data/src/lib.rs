#![forbid(unsafe_code)]

//! Data layer for the quiz contest engine: repository traits, wire DTOs with
//! the shared response envelope, in-memory demo sources that simulate network
//! latency, and an HTTP client for the remote leaderboard.

pub mod demo;
pub mod error;
pub mod remote;
pub mod repository;
pub mod wire;

pub use demo::{DemoContestSource, DemoLeaderboard, Latency};
pub use error::DataError;
pub use remote::{RemoteConfig, RemoteLeaderboard};
pub use repository::{ContestRepository, LeaderboardRepository, DEFAULT_PAGE_SIZE};
