use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{ContestId, ScoreSheet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("correct ({correct}) + wrong ({wrong}) does not match total ({total})")]
    CountMismatch { total: u32, correct: u32, wrong: u32 },

    #[error("score {score} exceeds maximum {max_score}")]
    ScoreExceedsMax { score: u32, max_score: u32 },

    #[error("rank {rank} exceeds participant count {participants}")]
    RankOutOfRange { rank: u32, participants: u32 },
}

/// Scored summary of one completed session. Produced once, never mutated.
///
/// Rank and participant count are supplied by the completion call (demo or
/// remote backend); the engine never computes them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    contest_id: ContestId,
    contest_title: String,
    total_questions: u32,
    correct_answers: u32,
    wrong_answers: u32,
    score: u32,
    max_score: u32,
    rank: u32,
    total_participants: u32,
    accuracy: f64,
    time_taken_secs: u64,
    completed_at: DateTime<Utc>,
}

impl SessionResult {
    /// Assemble a result from already-computed parts.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` when counts, score, or rank are inconsistent.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        contest_id: ContestId,
        contest_title: impl Into<String>,
        total_questions: u32,
        correct_answers: u32,
        wrong_answers: u32,
        score: u32,
        max_score: u32,
        rank: u32,
        total_participants: u32,
        accuracy: f64,
        time_taken_secs: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ResultError> {
        if correct_answers + wrong_answers != total_questions {
            return Err(ResultError::CountMismatch {
                total: total_questions,
                correct: correct_answers,
                wrong: wrong_answers,
            });
        }
        if score > max_score {
            return Err(ResultError::ScoreExceedsMax { score, max_score });
        }
        if rank > total_participants {
            return Err(ResultError::RankOutOfRange {
                rank,
                participants: total_participants,
            });
        }

        Ok(Self {
            contest_id,
            contest_title: contest_title.into(),
            total_questions,
            correct_answers,
            wrong_answers,
            score,
            max_score,
            rank,
            total_participants,
            accuracy,
            time_taken_secs,
            completed_at,
        })
    }

    /// Build a result from a graded score sheet plus externally supplied
    /// rank and participant totals.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` when the rank is inconsistent; the sheet itself
    /// always satisfies the count invariants.
    pub fn from_score_sheet(
        contest_id: ContestId,
        contest_title: impl Into<String>,
        sheet: ScoreSheet,
        rank: u32,
        total_participants: u32,
        time_taken_secs: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ResultError> {
        Self::new(
            contest_id,
            contest_title,
            sheet.total(),
            sheet.correct(),
            sheet.wrong(),
            sheet.score(),
            sheet.max_score(),
            rank,
            total_participants,
            sheet.accuracy(),
            time_taken_secs,
            completed_at,
        )
    }

    #[must_use]
    pub fn contest_id(&self) -> &ContestId {
        &self.contest_id
    }

    #[must_use]
    pub fn contest_title(&self) -> &str {
        &self.contest_title
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    #[must_use]
    pub fn rank(&self) -> u32 {
        self.rank
    }

    #[must_use]
    pub fn total_participants(&self) -> u32 {
        self.total_participants
    }

    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> u64 {
        self.time_taken_secs
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn rejects_count_mismatch() {
        let err = SessionResult::new(
            ContestId::new("daily_001"),
            "Daily Quiz Challenge",
            5,
            2,
            2,
            20,
            50,
            10,
            500,
            40.0,
            120,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResultError::CountMismatch {
                total: 5,
                correct: 2,
                wrong: 2
            }
        );
    }

    #[test]
    fn rejects_score_above_max() {
        let err = SessionResult::new(
            ContestId::new("daily_001"),
            "Daily Quiz Challenge",
            5,
            5,
            0,
            60,
            50,
            10,
            500,
            100.0,
            120,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResultError::ScoreExceedsMax {
                score: 60,
                max_score: 50
            }
        );
    }

    #[test]
    fn accepts_consistent_result() {
        let result = SessionResult::new(
            ContestId::new("daily_001"),
            "Daily Quiz Challenge",
            5,
            4,
            1,
            40,
            50,
            7,
            500,
            80.0,
            95,
            fixed_now(),
        )
        .unwrap();
        assert_eq!(result.correct_answers() + result.wrong_answers(), 5);
        assert_eq!(result.rank(), 7);
    }
}
