use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ContestId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContestError {
    #[error("contest title is empty")]
    EmptyTitle,

    #[error("contest ends before it starts")]
    InvalidWindow,

    #[error("enrolled count {enrolled} exceeds participant total {participants}")]
    EnrollmentExceedsParticipants { enrolled: u32, participants: u32 },

    #[error("unknown contest type: {0}")]
    UnknownType(String),

    #[error("unknown contest difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown contest status: {0}")]
    UnknownStatus(String),
}

/// Cadence of a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestType {
    Daily,
    Weekly,
    Monthly,
    Special,
}

impl ContestType {
    /// Parse the wire representation, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ContestError::UnknownType` for unrecognised values.
    pub fn parse(raw: &str) -> Result<Self, ContestError> {
        match raw.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "special" => Ok(Self::Special),
            _ => Err(ContestError::UnknownType(raw.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Special => "special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl ContestDifficulty {
    /// Parse the wire representation, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ContestError::UnknownDifficulty` for unrecognised values.
    pub fn parse(raw: &str) -> Result<Self, ContestError> {
        match raw.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "expert" => Ok(Self::Expert),
            _ => Err(ContestError::UnknownDifficulty(raw.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl ContestStatus {
    /// Parse the wire representation, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ContestError::UnknownStatus` for unrecognised values.
    pub fn parse(raw: &str) -> Result<Self, ContestError> {
        match raw.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => Err(ContestError::UnknownStatus(raw.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }
}

/// One entry in the contest catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Contest {
    id: ContestId,
    title: String,
    description: String,
    kind: ContestType,
    difficulty: ContestDifficulty,
    status: ContestStatus,
    total_questions: u32,
    time_per_question_secs: u32,
    total_participants: u32,
    prize_pool: Option<String>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    banner_url: Option<Url>,
    is_enrolled: bool,
    enrolled_count: u32,
}

impl Contest {
    /// Build a catalog entry, validating the title, the start/end window,
    /// and the enrollment counts.
    ///
    /// # Errors
    ///
    /// Returns `ContestError` when validation fails.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ContestId,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: ContestType,
        difficulty: ContestDifficulty,
        status: ContestStatus,
        total_questions: u32,
        time_per_question_secs: u32,
        total_participants: u32,
        prize_pool: Option<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        banner_url: Option<Url>,
        is_enrolled: bool,
        enrolled_count: u32,
    ) -> Result<Self, ContestError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ContestError::EmptyTitle);
        }
        if ends_at < starts_at {
            return Err(ContestError::InvalidWindow);
        }
        if enrolled_count > total_participants {
            return Err(ContestError::EnrollmentExceedsParticipants {
                enrolled: enrolled_count,
                participants: total_participants,
            });
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            kind,
            difficulty,
            status,
            total_questions,
            time_per_question_secs,
            total_participants,
            prize_pool,
            starts_at,
            ends_at,
            banner_url,
            is_enrolled,
            enrolled_count,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ContestId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn kind(&self) -> ContestType {
        self.kind
    }

    #[must_use]
    pub fn difficulty(&self) -> ContestDifficulty {
        self.difficulty
    }

    #[must_use]
    pub fn status(&self) -> ContestStatus {
        self.status
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn time_per_question_secs(&self) -> u32 {
        self.time_per_question_secs
    }

    #[must_use]
    pub fn total_participants(&self) -> u32 {
        self.total_participants
    }

    #[must_use]
    pub fn prize_pool(&self) -> Option<&str> {
        self.prize_pool.as_deref()
    }

    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    #[must_use]
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    #[must_use]
    pub fn banner_url(&self) -> Option<&Url> {
        self.banner_url.as_ref()
    }

    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.is_enrolled
    }

    #[must_use]
    pub fn enrolled_count(&self) -> u32 {
        self.enrolled_count
    }

    /// Record an enrollment: flips the flag and bumps the count once.
    ///
    /// Idempotent; enrolling twice does not bump the count again.
    pub fn mark_enrolled(&mut self) {
        if !self.is_enrolled {
            self.is_enrolled = true;
            self.enrolled_count = self.enrolled_count.saturating_add(1);
        }
    }
}

/// One previously played contest in the caller's history.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestHistoryEntry {
    pub contest_id: ContestId,
    pub contest_title: String,
    pub kind: ContestType,
    pub score: u32,
    pub max_score: u32,
    pub rank: u32,
    pub total_participants: u32,
    pub accuracy: f64,
    pub completed_at: DateTime<Utc>,
}

/// Aggregate statistics over the caller's contest history.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestStatistics {
    pub contests_played: u32,
    pub average_score: f64,
    pub average_rank: f64,
    pub best_rank: u32,
    pub total_points: u32,
    pub weekly: Vec<WeeklyContestStat>,
    pub monthly: Vec<MonthlyContestStat>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyContestStat {
    pub week_number: u32,
    pub contests_played: u32,
    pub average_score: f64,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyContestStat {
    pub month: String,
    pub contests_played: u32,
    pub average_score: f64,
    pub total_points: u32,
}
