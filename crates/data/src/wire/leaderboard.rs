use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use quiz_core::model::{Badge, Leaderboard, LeaderboardEntry, PageInfo, UserId};

use crate::error::DataError;
use crate::wire::envelope::PaginationDto;

/// Wire shape of one leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub score: u32,
    pub rank: u32,
    pub total_quizzes: u32,
    pub accuracy: f64,
}

impl TryFrom<LeaderboardEntryDto> for LeaderboardEntry {
    type Error = DataError;

    fn try_from(dto: LeaderboardEntryDto) -> Result<Self, Self::Error> {
        let avatar_url = dto
            .avatar_url
            .map(|raw| Url::parse(&raw).map_err(DataError::invalid))
            .transpose()?;
        // Badge is presentation-free domain data derived here, not sent on
        // the wire.
        let badge = Badge::for_rank(dto.rank);
        Ok(LeaderboardEntry {
            user_id: UserId::new(dto.user_id),
            username: dto.username,
            avatar_url,
            score: dto.score,
            rank: dto.rank,
            quizzes_played: dto.total_quizzes,
            accuracy: dto.accuracy,
            badge,
        })
    }
}

/// Wire shape of the leaderboard payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardDataDto {
    pub entries: Vec<LeaderboardEntryDto>,
    #[serde(default, rename = "current_user")]
    pub current_user_entry: Option<LeaderboardEntryDto>,
    pub total_participants: u32,
    /// Epoch milliseconds.
    pub last_updated: i64,
}

impl LeaderboardDataDto {
    /// Map the payload plus optional envelope pagination into the domain.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Invalid` when a row fails validation.
    pub fn into_domain(self, pagination: Option<PaginationDto>) -> Result<Leaderboard, DataError> {
        let entries = self
            .entries
            .into_iter()
            .map(LeaderboardEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let current_user = self
            .current_user_entry
            .map(LeaderboardEntry::try_from)
            .transpose()?;
        let last_updated = DateTime::<Utc>::from_timestamp_millis(self.last_updated)
            .ok_or_else(|| DataError::Invalid(format!("timestamp out of range: {}", self.last_updated)))?;

        Ok(Leaderboard {
            entries,
            current_user,
            total_participants: self.total_participants,
            last_updated,
            page: pagination.map(|p| PageInfo {
                current_page: p.current_page,
                page_size: p.page_size,
                total_pages: p.total_pages,
                total_items: p.total_items,
                has_next: p.has_next,
                has_previous: p.has_previous,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: u32) -> LeaderboardEntryDto {
        LeaderboardEntryDto {
            user_id: format!("user_{rank:03}"),
            username: format!("Player {rank}"),
            avatar_url: Some(format!("https://i.pravatar.cc/150?img={rank}")),
            score: 1000 - rank * 10,
            rank,
            total_quizzes: 30,
            accuracy: 90.0,
        }
    }

    #[test]
    fn derives_badges_from_rank() {
        let data = LeaderboardDataDto {
            entries: vec![entry(1), entry(2), entry(3), entry(4)],
            current_user_entry: None,
            total_participants: 1250,
            last_updated: 1_700_000_000_000,
        };
        let board = data.into_domain(None).unwrap();
        let badges: Vec<Badge> = board.entries.iter().map(|e| e.badge).collect();
        assert_eq!(badges, vec![Badge::Gold, Badge::Silver, Badge::Bronze, Badge::None]);
    }

    #[test]
    fn carries_pagination_into_page_info() {
        let data = LeaderboardDataDto {
            entries: vec![entry(1)],
            current_user_entry: Some(entry(42)),
            total_participants: 1250,
            last_updated: 1_700_000_000_000,
        };
        let pagination = PaginationDto {
            current_page: 2,
            page_size: 10,
            total_pages: 3,
            total_items: 25,
            has_next: true,
            has_previous: true,
        };
        let board = data.into_domain(Some(pagination)).unwrap();
        let page = board.page.unwrap();
        assert_eq!(page.current_page, 2);
        assert!(page.has_next);
        assert_eq!(board.current_user.unwrap().rank, 42);
    }

    #[test]
    fn rejects_invalid_avatar_url() {
        let mut dto = entry(1);
        dto.avatar_url = Some("not a url".into());
        assert!(matches!(
            LeaderboardEntry::try_from(dto),
            Err(DataError::Invalid(_))
        ));
    }
}
