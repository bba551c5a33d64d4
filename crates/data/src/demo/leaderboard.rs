use async_trait::async_trait;
use tracing::debug;

use quiz_core::model::Leaderboard;
use quiz_core::Clock;

use crate::error::DataError;
use crate::repository::LeaderboardRepository;
use crate::wire::{ApiResponse, LeaderboardDataDto, LeaderboardEntryDto, PaginationDto};

use super::{simulate, Latency};

const TOTAL_PARTICIPANTS: u32 = 1250;

/// Demo backend paginating a fixed ranked roster.
pub struct DemoLeaderboard {
    clock: Clock,
    latency: Latency,
    roster: Vec<LeaderboardEntryDto>,
}

impl DemoLeaderboard {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            latency: Latency::demo(),
            roster: demo_roster(),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    fn response(&self, page: u32, page_size: u32) -> ApiResponse<LeaderboardDataDto> {
        let total_items = u32::try_from(self.roster.len()).unwrap_or(u32::MAX);
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size);
        let start = ((page.max(1) - 1) * page_size) as usize;
        let end = (start + page_size as usize).min(self.roster.len());
        let entries = if start < self.roster.len() {
            self.roster[start..end].to_vec()
        } else {
            Vec::new()
        };

        let now_millis = self.clock.now().timestamp_millis();
        ApiResponse::ok(
            LeaderboardDataDto {
                entries,
                current_user_entry: Some(current_user()),
                total_participants: TOTAL_PARTICIPANTS,
                last_updated: now_millis,
            },
            "Leaderboard fetched successfully",
            now_millis,
        )
        .with_pagination(PaginationDto {
            current_page: page,
            page_size,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_previous: page > 1,
        })
    }
}

#[async_trait]
impl LeaderboardRepository for DemoLeaderboard {
    async fn page(&self, page: u32, page_size: u32) -> Result<Leaderboard, DataError> {
        simulate(self.latency.list).await;

        debug!(page, page_size, "fetching demo leaderboard page");
        let (data, pagination) = self.response(page, page_size).into_data()?;
        data.into_domain(pagination)
    }

    async fn top(&self, limit: u32) -> Result<Leaderboard, DataError> {
        simulate(self.latency.list).await;

        let (data, pagination) = self.response(1, limit).into_data()?;
        data.into_domain(pagination)
    }
}

fn current_user() -> LeaderboardEntryDto {
    LeaderboardEntryDto {
        user_id: "user_current".into(),
        username: "You".into(),
        avatar_url: Some("https://i.pravatar.cc/150?img=32".into()),
        score: 742,
        rank: 12,
        total_quizzes: 20,
        accuracy: 83.4,
    }
}

fn demo_roster() -> Vec<LeaderboardEntryDto> {
    let rows: [(&str, &str, u8, u32, u32, f64); 10] = [
        ("user_001", "Sophia Cho", 1, 960, 32, 96.0),
        ("user_002", "Emma Ema", 5, 895, 30, 92.3),
        ("user_003", "Andrew W", 12, 880, 28, 91.5),
        ("user_004", "Bayu aji sadewa", 8, 820, 25, 89.2),
        ("user_005", "Olivia Ava", 9, 805, 24, 87.8),
        ("user_006", "David Joshua", 13, 792, 23, 86.5),
        ("user_007", "Charlotte Harper", 10, 775, 22, 85.1),
        ("user_008", "Liam Noah", 14, 760, 21, 84.0),
        ("user_009", "Mia Lucas", 16, 748, 20, 82.9),
        ("user_010", "Ethan James", 17, 735, 19, 81.7),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (id, name, avatar, score, quizzes, accuracy))| LeaderboardEntryDto {
            user_id: id.into(),
            username: name.into(),
            avatar_url: Some(format!("https://i.pravatar.cc/150?img={avatar}")),
            score,
            rank: u32::try_from(i).unwrap_or(u32::MAX) + 1,
            total_quizzes: quizzes,
            accuracy,
        })
        .collect()
}
