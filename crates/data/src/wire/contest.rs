use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use quiz_core::model::{
    Contest, ContestDifficulty, ContestHistoryEntry, ContestId, ContestStatistics, ContestStatus,
    ContestType, MonthlyContestStat, Question, QuestionId, QuizSession, SessionResult,
    WeeklyContestStat,
};

use crate::error::DataError;

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, DataError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| DataError::Invalid(format!("timestamp out of range: {millis}")))
}

fn parse_optional_url(raw: Option<String>) -> Result<Option<Url>, DataError> {
    raw.map(|value| Url::parse(&value).map_err(DataError::invalid))
        .transpose()
}

/// Wire shape of one catalog contest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestDto {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub status: String,
    pub total_questions: u32,
    pub time_per_question: u32,
    pub total_participants: u32,
    #[serde(default)]
    pub prize_pool: Option<String>,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_enrolled: bool,
    #[serde(default)]
    pub enrolled_count: u32,
}

impl TryFrom<ContestDto> for Contest {
    type Error = DataError;

    fn try_from(dto: ContestDto) -> Result<Self, Self::Error> {
        Contest::new(
            ContestId::new(dto.id),
            dto.title,
            dto.description,
            ContestType::parse(&dto.kind).map_err(DataError::invalid)?,
            ContestDifficulty::parse(&dto.difficulty).map_err(DataError::invalid)?,
            ContestStatus::parse(&dto.status).map_err(DataError::invalid)?,
            dto.total_questions,
            dto.time_per_question,
            dto.total_participants,
            dto.prize_pool,
            millis_to_datetime(dto.start_time)?,
            millis_to_datetime(dto.end_time)?,
            parse_optional_url(dto.image_url)?,
            dto.is_enrolled,
            dto.enrolled_count,
        )
        .map_err(DataError::invalid)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestListDto {
    pub contests: Vec<ContestDto>,
}

/// Wire shape of one session question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDto {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub time_limit: u32,
    pub points: u32,
}

impl TryFrom<QuestionDto> for Question {
    type Error = DataError;

    fn try_from(dto: QuestionDto) -> Result<Self, Self::Error> {
        Question::new(
            QuestionId::new(dto.id),
            dto.question_text,
            dto.options,
            dto.correct_answer_index,
            dto.time_limit,
            dto.points,
        )
        .map_err(DataError::invalid)
    }
}

/// Wire shape of a freshly started session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub contest_id: String,
    pub contest_title: String,
    pub questions: Vec<QuestionDto>,
    pub time_per_question: u32,
}

impl TryFrom<SessionDto> for QuizSession {
    type Error = DataError;

    fn try_from(dto: SessionDto) -> Result<Self, Self::Error> {
        let questions = dto
            .questions
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QuizSession::new(
            ContestId::new(dto.contest_id),
            dto.contest_title,
            questions,
            dto.time_per_question,
        ))
    }
}

/// Wire shape of a scored contest result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultDto {
    pub contest_id: String,
    pub contest_title: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub total_score: u32,
    pub max_score: u32,
    pub rank: u32,
    pub total_participants: u32,
    pub time_taken: u64,
    pub accuracy: f64,
    pub completed_at: i64,
}

impl TryFrom<ResultDto> for SessionResult {
    type Error = DataError;

    fn try_from(dto: ResultDto) -> Result<Self, Self::Error> {
        SessionResult::new(
            ContestId::new(dto.contest_id),
            dto.contest_title,
            dto.total_questions,
            dto.correct_answers,
            dto.wrong_answers,
            dto.total_score,
            dto.max_score,
            dto.rank,
            dto.total_participants,
            dto.accuracy,
            dto.time_taken,
            millis_to_datetime(dto.completed_at)?,
        )
        .map_err(DataError::invalid)
    }
}

/// Wire shape of one previously played contest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub contest_id: String,
    pub contest_title: String,
    #[serde(rename = "contest_type")]
    pub kind: String,
    pub score: u32,
    pub max_score: u32,
    pub rank: u32,
    pub total_participants: u32,
    pub completed_at: i64,
    pub accuracy: f64,
}

impl TryFrom<HistoryEntryDto> for ContestHistoryEntry {
    type Error = DataError;

    fn try_from(dto: HistoryEntryDto) -> Result<Self, Self::Error> {
        Ok(ContestHistoryEntry {
            contest_id: ContestId::new(dto.contest_id),
            contest_title: dto.contest_title,
            kind: ContestType::parse(&dto.kind).map_err(DataError::invalid)?,
            score: dto.score,
            max_score: dto.max_score,
            rank: dto.rank,
            total_participants: dto.total_participants,
            accuracy: dto.accuracy,
            completed_at: millis_to_datetime(dto.completed_at)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStatDto {
    pub week_number: u32,
    pub contests_participated: u32,
    pub average_score: f64,
    pub total_points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStatDto {
    pub month: String,
    pub contests_participated: u32,
    pub average_score: f64,
    pub total_points: u32,
}

/// Wire shape of the aggregate statistics block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsDto {
    pub total_contests_participated: u32,
    pub average_score: f64,
    pub average_rank: f64,
    pub best_rank: u32,
    pub total_points: u32,
    pub weekly_stats: Vec<WeeklyStatDto>,
    pub monthly_stats: Vec<MonthlyStatDto>,
}

impl From<StatisticsDto> for ContestStatistics {
    fn from(dto: StatisticsDto) -> Self {
        ContestStatistics {
            contests_played: dto.total_contests_participated,
            average_score: dto.average_score,
            average_rank: dto.average_rank,
            best_rank: dto.best_rank,
            total_points: dto.total_points,
            weekly: dto
                .weekly_stats
                .into_iter()
                .map(|w| WeeklyContestStat {
                    week_number: w.week_number,
                    contests_played: w.contests_participated,
                    average_score: w.average_score,
                    total_points: w.total_points,
                })
                .collect(),
            monthly: dto
                .monthly_stats
                .into_iter()
                .map(|m| MonthlyContestStat {
                    month: m.month,
                    contests_played: m.contests_participated,
                    average_score: m.average_score,
                    total_points: m.total_points,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contest_dto() -> ContestDto {
        ContestDto {
            id: "daily_001".into(),
            title: "Daily Quiz Challenge".into(),
            description: "Test your knowledge daily and compete with others!".into(),
            kind: "daily".into(),
            difficulty: "medium".into(),
            status: "ongoing".into(),
            total_questions: 10,
            time_per_question: 30,
            total_participants: 1250,
            prize_pool: Some("100 Coins".into()),
            start_time: 1_700_000_000_000,
            end_time: 1_700_086_400_000,
            image_url: Some("https://i.pravatar.cc/300?img=1".into()),
            is_enrolled: false,
            enrolled_count: 450,
        }
    }

    #[test]
    fn maps_contest_dto_to_domain() {
        let contest = Contest::try_from(contest_dto()).unwrap();
        assert_eq!(contest.id().as_str(), "daily_001");
        assert_eq!(contest.kind(), ContestType::Daily);
        assert_eq!(contest.difficulty(), ContestDifficulty::Medium);
        assert!(contest.banner_url().is_some());
    }

    #[test]
    fn rejects_unknown_contest_type() {
        let mut dto = contest_dto();
        dto.kind = "hourly".into();
        assert!(matches!(
            Contest::try_from(dto),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_question_with_bad_correct_index() {
        let dto = QuestionDto {
            id: "q1".into(),
            question_text: "Pick".into(),
            options: vec!["a".into(), "b".into()],
            correct_answer_index: 5,
            time_limit: 30,
            points: 10,
        };
        assert!(matches!(
            Question::try_from(dto),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn maps_session_dto() {
        let dto = SessionDto {
            contest_id: "daily_001".into(),
            contest_title: "Daily Quiz Challenge".into(),
            questions: vec![QuestionDto {
                id: "q1".into(),
                question_text: "What is the capital of France?".into(),
                options: vec!["London".into(), "Berlin".into(), "Paris".into(), "Madrid".into()],
                correct_answer_index: 2,
                time_limit: 30,
                points: 10,
            }],
            time_per_question: 30,
        };
        let session = QuizSession::try_from(dto).unwrap();
        assert_eq!(session.question_count(), 1);
        assert_eq!(session.time_per_question_secs(), 30);
    }

    #[test]
    fn rejects_inconsistent_result_dto() {
        let dto = ResultDto {
            contest_id: "daily_001".into(),
            contest_title: "Daily Quiz Challenge".into(),
            total_questions: 5,
            correct_answers: 3,
            wrong_answers: 3,
            total_score: 30,
            max_score: 50,
            rank: 10,
            total_participants: 500,
            time_taken: 120,
            accuracy: 60.0,
            completed_at: 1_700_000_000_000,
        };
        assert!(matches!(
            SessionResult::try_from(dto),
            Err(DataError::Invalid(_))
        ));
    }
}
