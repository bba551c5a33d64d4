#![forbid(unsafe_code)]

//! Domain model for the quiz contest engine.
//!
//! This crate holds the pure types: contests, questions, session payloads,
//! score sheets and results, leaderboards, and the clock abstraction used to
//! keep time deterministic in tests. It knows nothing about transports,
//! persistence, or timers; those live in the `data` and `services` crates.

pub mod error;
pub mod model;
pub mod time;

pub use error::Error;
pub use time::Clock;
