use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Duration;
use rand::Rng;
use tracing::{debug, info};

use quiz_core::model::{
    AnswerMap, Contest, ContestHistoryEntry, ContestId, ContestStatistics, ContestType,
    MonthlyContestStat, Question, QuizSession, ScoreSheet, SessionResult, WeeklyContestStat,
};
use quiz_core::Clock;

use crate::error::DataError;
use crate::repository::ContestRepository;
use crate::wire::{ApiResponse, ContestDto, ContestListDto, HistoryEntryDto, QuestionDto, SessionDto};

use super::{simulate, Latency};

const DEMO_PARTICIPANTS: u32 = 500;

/// Demo backend for the contest catalog and session lifecycle.
///
/// Holds a fixed catalog and question bank, wraps every payload in the same
/// `ApiResponse` envelope the remote API would use, and grades completed
/// sessions locally. Enrollment mutates the in-memory catalog so repeated
/// reads observe it.
pub struct DemoContestSource {
    clock: Clock,
    latency: Latency,
    contests: Mutex<Vec<ContestDto>>,
    questions: Vec<QuestionDto>,
    history: Vec<HistoryEntryDto>,
}

impl DemoContestSource {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        let now = clock.now();
        Self {
            clock,
            latency: Latency::demo(),
            contests: Mutex::new(demo_contests(now.timestamp_millis())),
            questions: demo_questions(),
            history: demo_history(now.timestamp_millis()),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    fn now_millis(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    fn catalog(&self) -> Result<MutexGuard<'_, Vec<ContestDto>>, DataError> {
        self.contests
            .lock()
            .map_err(|e| DataError::Invalid(e.to_string()))
    }

    fn question_bank(&self) -> Result<Vec<Question>, DataError> {
        self.questions
            .iter()
            .cloned()
            .map(Question::try_from)
            .collect()
    }
}

#[async_trait]
impl ContestRepository for DemoContestSource {
    async fn list_contests(&self, kind: Option<ContestType>) -> Result<Vec<Contest>, DataError> {
        simulate(self.latency.list).await;

        let contests: Vec<ContestDto> = {
            let catalog = self.catalog()?;
            match kind {
                Some(kind) => catalog
                    .iter()
                    .filter(|dto| dto.kind.eq_ignore_ascii_case(kind.as_str()))
                    .cloned()
                    .collect(),
                None => catalog.clone(),
            }
        };

        let response = ApiResponse::ok(
            ContestListDto { contests },
            "Contests fetched successfully",
            self.now_millis(),
        );
        let (data, _) = response.into_data()?;
        debug!(count = data.contests.len(), "listed demo contests");
        data.contests.into_iter().map(Contest::try_from).collect()
    }

    async fn get_contest(&self, id: &ContestId) -> Result<Contest, DataError> {
        simulate(self.latency.item).await;

        let found = self
            .catalog()?
            .iter()
            .find(|dto| dto.id == id.as_str())
            .cloned();
        let response = match found {
            Some(contest) => ApiResponse::ok(contest, "Contest fetched successfully", self.now_millis()),
            None => ApiResponse::failure(404, "Contest not found", self.now_millis()),
        };
        let (dto, _) = response.into_data()?;
        Contest::try_from(dto)
    }

    async fn enroll(&self, id: &ContestId) -> Result<Contest, DataError> {
        simulate(self.latency.item).await;

        let dto = {
            let mut catalog = self.catalog()?;
            let entry = catalog
                .iter_mut()
                .find(|dto| dto.id == id.as_str())
                .ok_or(DataError::NotFound)?;
            if !entry.is_enrolled {
                entry.is_enrolled = true;
                entry.enrolled_count += 1;
            }
            entry.clone()
        };

        info!(contest = %id, "enrolled in demo contest");
        Contest::try_from(dto)
    }

    async fn start_session(&self, id: &ContestId) -> Result<QuizSession, DataError> {
        simulate(self.latency.list).await;

        let (title, time_per_question) = {
            let catalog = self.catalog()?;
            let entry = catalog
                .iter()
                .find(|dto| dto.id == id.as_str())
                .ok_or(DataError::NotFound)?;
            (entry.title.clone(), entry.time_per_question)
        };

        let response = ApiResponse::ok(
            SessionDto {
                contest_id: id.to_string(),
                contest_title: title,
                questions: self.questions.clone(),
                time_per_question,
            },
            "Contest started successfully",
            self.now_millis(),
        );
        let (dto, _) = response.into_data()?;
        info!(contest = %id, questions = dto.questions.len(), "started demo session");
        QuizSession::try_from(dto)
    }

    async fn complete_session(
        &self,
        id: &ContestId,
        answers: &AnswerMap,
        time_taken_secs: u64,
    ) -> Result<SessionResult, DataError> {
        simulate(self.latency.list).await;

        let title = {
            let catalog = self.catalog()?;
            catalog
                .iter()
                .find(|dto| dto.id == id.as_str())
                .map(|dto| dto.title.clone())
                .ok_or(DataError::NotFound)?
        };

        let questions = self.question_bank()?;
        let sheet = ScoreSheet::grade(&questions, answers);
        let rank: u32 = rand::rng().random_range(1..=100);

        let result = SessionResult::from_score_sheet(
            id.clone(),
            title,
            sheet,
            rank,
            DEMO_PARTICIPANTS,
            time_taken_secs,
            self.clock.now(),
        )
        .map_err(DataError::invalid)?;

        info!(
            contest = %id,
            correct = result.correct_answers(),
            score = result.score(),
            rank = result.rank(),
            "completed demo session"
        );
        Ok(result)
    }

    async fn contest_history(&self) -> Result<Vec<ContestHistoryEntry>, DataError> {
        simulate(self.latency.item).await;

        self.history
            .iter()
            .cloned()
            .map(ContestHistoryEntry::try_from)
            .collect()
    }

    async fn contest_statistics(&self) -> Result<ContestStatistics, DataError> {
        simulate(self.latency.item).await;

        let entries = self
            .history
            .iter()
            .cloned()
            .map(ContestHistoryEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(aggregate_statistics(&entries))
    }
}

/// Fold the played-contest history into the statistics block. The weekly and
/// monthly buckets stay fixed demo data; the backend would compute them.
fn aggregate_statistics(history: &[ContestHistoryEntry]) -> ContestStatistics {
    let played = u32::try_from(history.len()).unwrap_or(u32::MAX);
    let count = history.len().max(1) as f64;
    let average_score = history.iter().map(|h| f64::from(h.score)).sum::<f64>() / count;
    let average_rank = history.iter().map(|h| f64::from(h.rank)).sum::<f64>() / count;
    let best_rank = history.iter().map(|h| h.rank).min().unwrap_or(0);
    let total_points = history.iter().map(|h| h.score).sum();

    ContestStatistics {
        contests_played: played,
        average_score,
        average_rank,
        best_rank,
        total_points,
        weekly: vec![
            WeeklyContestStat {
                week_number: 48,
                contests_played: 5,
                average_score: 78.0,
                total_points: 390,
            },
            WeeklyContestStat {
                week_number: 49,
                contests_played: 6,
                average_score: 82.0,
                total_points: 492,
            },
            WeeklyContestStat {
                week_number: 50,
                contests_played: 7,
                average_score: 85.0,
                total_points: 595,
            },
            WeeklyContestStat {
                week_number: 51,
                contests_played: 7,
                average_score: 83.0,
                total_points: 581,
            },
        ],
        monthly: vec![
            MonthlyContestStat {
                month: "October".into(),
                contests_played: 8,
                average_score: 75.0,
                total_points: 600,
            },
            MonthlyContestStat {
                month: "November".into(),
                contests_played: 10,
                average_score: 80.0,
                total_points: 800,
            },
            MonthlyContestStat {
                month: "December".into(),
                contests_played: 7,
                average_score: 85.0,
                total_points: 662,
            },
        ],
    }
}

fn demo_contests(now_millis: i64) -> Vec<ContestDto> {
    let one_day = Duration::days(1).num_milliseconds();

    vec![
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
            start_time: now_millis - one_day,
            end_time: now_millis + one_day,
            image_url: Some("https://i.pravatar.cc/300?img=1".into()),
            is_enrolled: false,
            enrolled_count: 450,
        },
        ContestDto {
            id: "daily_002".into(),
            title: "Science Trivia Daily".into(),
            description: "Daily science questions to challenge your mind!".into(),
            kind: "daily".into(),
            difficulty: "easy".into(),
            status: "ongoing".into(),
            total_questions: 15,
            time_per_question: 25,
            total_participants: 890,
            prize_pool: Some("50 Coins".into()),
            start_time: now_millis - one_day,
            end_time: now_millis + one_day,
            image_url: Some("https://i.pravatar.cc/300?img=2".into()),
            is_enrolled: true,
            enrolled_count: 320,
        },
        ContestDto {
            id: "weekly_001".into(),
            title: "Weekly Grand Challenge".into(),
            description: "Weekly mega contest with bigger prizes!".into(),
            kind: "weekly".into(),
            difficulty: "hard".into(),
            status: "upcoming".into(),
            total_questions: 25,
            time_per_question: 45,
            total_participants: 5000,
            prize_pool: Some("500 Coins + Badge".into()),
            start_time: now_millis + 2 * one_day,
            end_time: now_millis + 9 * one_day,
            image_url: Some("https://i.pravatar.cc/300?img=3".into()),
            is_enrolled: false,
            enrolled_count: 1200,
        },
        ContestDto {
            id: "weekly_002".into(),
            title: "Programming Weekly Contest".into(),
            description: "Test your coding knowledge every week!".into(),
            kind: "weekly".into(),
            difficulty: "expert".into(),
            status: "upcoming".into(),
            total_questions: 20,
            time_per_question: 60,
            total_participants: 2500,
            prize_pool: Some("1000 Coins".into()),
            start_time: now_millis + 3 * one_day,
            end_time: now_millis + 10 * one_day,
            image_url: Some("https://i.pravatar.cc/300?img=4".into()),
            is_enrolled: true,
            enrolled_count: 850,
        },
        ContestDto {
            id: "monthly_001".into(),
            title: "Monthly Championship".into(),
            description: "The ultimate monthly challenge with premium rewards!".into(),
            kind: "monthly".into(),
            difficulty: "expert".into(),
            status: "upcoming".into(),
            total_questions: 50,
            time_per_question: 60,
            total_participants: 10000,
            prize_pool: Some("5000 Coins + Premium Badge".into()),
            start_time: now_millis + 7 * one_day,
            end_time: now_millis + 37 * one_day,
            image_url: Some("https://i.pravatar.cc/300?img=5".into()),
            is_enrolled: false,
            enrolled_count: 3500,
        },
        ContestDto {
            id: "monthly_002".into(),
            title: "General Knowledge Marathon".into(),
            description: "Monthly general knowledge mega contest!".into(),
            kind: "monthly".into(),
            difficulty: "hard".into(),
            status: "upcoming".into(),
            total_questions: 40,
            time_per_question: 50,
            total_participants: 8000,
            prize_pool: Some("3000 Coins".into()),
            start_time: now_millis + 10 * one_day,
            end_time: now_millis + 40 * one_day,
            image_url: Some("https://i.pravatar.cc/300?img=6".into()),
            is_enrolled: false,
            enrolled_count: 2100,
        },
    ]
}

fn demo_questions() -> Vec<QuestionDto> {
    vec![
        QuestionDto {
            id: "q1".into(),
            question_text: "What is the capital of France?".into(),
            options: vec!["London".into(), "Berlin".into(), "Paris".into(), "Madrid".into()],
            correct_answer_index: 2,
            time_limit: 30,
            points: 10,
        },
        QuestionDto {
            id: "q2".into(),
            question_text: "Which planet is known as the Red Planet?".into(),
            options: vec!["Venus".into(), "Mars".into(), "Jupiter".into(), "Saturn".into()],
            correct_answer_index: 1,
            time_limit: 30,
            points: 10,
        },
        QuestionDto {
            id: "q3".into(),
            question_text: "What is 15 \u{d7} 7?".into(),
            options: vec!["95".into(), "105".into(), "115".into(), "125".into()],
            correct_answer_index: 1,
            time_limit: 30,
            points: 10,
        },
        QuestionDto {
            id: "q4".into(),
            question_text: "Who painted the Mona Lisa?".into(),
            options: vec![
                "Van Gogh".into(),
                "Picasso".into(),
                "Leonardo da Vinci".into(),
                "Michelangelo".into(),
            ],
            correct_answer_index: 2,
            time_limit: 30,
            points: 10,
        },
        QuestionDto {
            id: "q5".into(),
            question_text: "What is the largest ocean on Earth?".into(),
            options: vec!["Atlantic".into(), "Indian".into(), "Arctic".into(), "Pacific".into()],
            correct_answer_index: 3,
            time_limit: 30,
            points: 10,
        },
    ]
}

fn demo_history(now_millis: i64) -> Vec<HistoryEntryDto> {
    let one_day = Duration::days(1).num_milliseconds();

    vec![
        HistoryEntryDto {
            contest_id: "prev_001".into(),
            contest_title: "Daily Quiz - Dec 20".into(),
            kind: "daily".into(),
            score: 85,
            max_score: 100,
            rank: 15,
            total_participants: 500,
            completed_at: now_millis - 7 * one_day,
            accuracy: 85.0,
        },
        HistoryEntryDto {
            contest_id: "prev_002".into(),
            contest_title: "Weekly Challenge - Week 50".into(),
            kind: "weekly".into(),
            score: 180,
            max_score: 250,
            rank: 42,
            total_participants: 2500,
            completed_at: now_millis - 14 * one_day,
            accuracy: 72.0,
        },
        HistoryEntryDto {
            contest_id: "prev_003".into(),
            contest_title: "Daily Quiz - Dec 18".into(),
            kind: "daily".into(),
            score: 90,
            max_score: 100,
            rank: 8,
            total_participants: 450,
            completed_at: now_millis - 9 * one_day,
            accuracy: 90.0,
        },
        HistoryEntryDto {
            contest_id: "prev_004".into(),
            contest_title: "Daily Quiz - Dec 15".into(),
            kind: "daily".into(),
            score: 75,
            max_score: 100,
            rank: 32,
            total_participants: 520,
            completed_at: now_millis - 12 * one_day,
            accuracy: 75.0,
        },
        HistoryEntryDto {
            contest_id: "prev_005".into(),
            contest_title: "Weekly Challenge - Week 49".into(),
            kind: "weekly".into(),
            score: 200,
            max_score: 250,
            rank: 28,
            total_participants: 2800,
            completed_at: now_millis - 21 * one_day,
            accuracy: 80.0,
        },
    ]
}
