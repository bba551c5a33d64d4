use chrono::{DateTime, Utc};
use url::Url;

use crate::model::UserId;

/// Badge shown next to top performers, derived from rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    #[default]
    None,
}

impl Badge {
    #[must_use]
    pub fn for_rank(rank: u32) -> Self {
        match rank {
            1 => Self::Gold,
            2 => Self::Silver,
            3 => Self::Bronze,
            _ => Self::None,
        }
    }
}

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub username: String,
    pub avatar_url: Option<Url>,
    pub score: u32,
    pub rank: u32,
    pub quizzes_played: u32,
    pub accuracy: f64,
    pub badge: Badge,
}

/// Pagination metadata echoed from the API envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// A page of the leaderboard plus the caller's own placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub current_user: Option<LeaderboardEntry>,
    pub total_participants: u32,
    pub last_updated: DateTime<Utc>,
    pub page: Option<PageInfo>,
}
