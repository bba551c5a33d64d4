use std::sync::Arc;

use async_trait::async_trait;
use data::{ContestRepository, DataError, DemoContestSource, Latency};
use quiz_core::model::{
    AnswerMap, Contest, ContestHistoryEntry, ContestId, ContestStatistics, ContestType, Question,
    QuestionId, QuizSession, SessionResult,
};
use quiz_core::time::{fixed_clock, fixed_now};
use services::session::{SessionEngine, SessionFlow, SessionRunner};

// Demo question bank: q1 -> Paris(2), q2 -> Mars(1), q3 -> 105(1),
// q4 -> da Vinci(2), q5 -> Pacific(3).
const CORRECT: [usize; 5] = [2, 1, 1, 2, 3];

fn demo_flow() -> SessionFlow {
    let contests: Arc<dyn ContestRepository> =
        Arc::new(DemoContestSource::new(fixed_clock()).with_latency(Latency::none()));
    SessionFlow::new(contests, fixed_clock())
}

#[tokio::test(start_paused = true)]
async fn answering_every_question_scores_full_marks() {
    let flow = demo_flow();
    let handle = flow.begin(&ContestId::new("daily_001")).await.unwrap();
    let mut updates = handle.updates();

    for (i, &answer) in CORRECT.iter().enumerate() {
        assert!(handle.select(answer).await);
        assert!(handle.submit().await);
        updates
            .wait_for(|u| u.snapshot.current_index > i || u.result.is_some())
            .await
            .unwrap();
    }

    let last = handle.join().await;
    let result = last.result.expect("completed session should carry a result");
    assert!(last.snapshot.is_complete);
    assert_eq!(result.total_questions(), 5);
    assert_eq!(result.correct_answers(), 5);
    assert_eq!(result.wrong_answers(), 0);
    assert!((result.accuracy() - 100.0).abs() < f64::EPSILON);
    assert_eq!(result.score(), 50);
    assert_eq!(result.total_participants(), 500);
}

#[tokio::test(start_paused = true)]
async fn unattended_session_times_out_every_question() {
    let flow = demo_flow();
    let handle = flow.begin(&ContestId::new("daily_001")).await.unwrap();

    // No commands at all; the countdown drives the session to completion.
    let last = handle.join().await;
    let result = last.result.unwrap();
    assert_eq!(result.correct_answers(), 0);
    assert_eq!(result.wrong_answers(), 5);
    assert!(result.accuracy().abs() < f64::EPSILON);
    assert_eq!(result.score(), 0);
}

#[tokio::test(start_paused = true)]
async fn mixed_answers_and_timeouts_grade_partially() {
    let flow = demo_flow();
    let handle = flow.begin(&ContestId::new("daily_001")).await.unwrap();
    let mut updates = handle.updates();

    for (i, &answer) in CORRECT.iter().take(2).enumerate() {
        handle.select(answer).await;
        handle.submit().await;
        updates
            .wait_for(|u| u.snapshot.current_index > i)
            .await
            .unwrap();
    }

    // Let the remaining three questions expire.
    let last = handle.join().await;
    let result = last.result.unwrap();
    assert_eq!(result.correct_answers(), 2);
    assert_eq!(result.wrong_answers(), 3);
    assert!((result.accuracy() - 40.0).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn advancing_rearms_a_full_countdown() {
    let flow = demo_flow();
    let handle = flow.begin(&ContestId::new("daily_001")).await.unwrap();
    let mut updates = handle.updates();

    // Let the first question's countdown run down a bit.
    updates
        .wait_for(|u| u.snapshot.time_remaining_secs <= 27)
        .await
        .unwrap();

    handle.select(CORRECT[0]).await;
    handle.submit().await;
    let update = updates
        .wait_for(|u| u.snapshot.current_index == 1)
        .await
        .unwrap()
        .clone();

    // The previous timer was replaced, not resumed: the new question starts
    // from the full per-question budget.
    assert_eq!(update.snapshot.time_remaining_secs, 30);
}

#[tokio::test(start_paused = true)]
async fn abandoning_stops_the_session_without_a_result() {
    let flow = demo_flow();
    let handle = flow.begin(&ContestId::new("daily_001")).await.unwrap();

    assert!(handle.abandon().await);
    let last = handle.join().await;
    assert!(last.result.is_none());
    assert!(last.error.is_none());
    assert!(!last.snapshot.is_complete);
}

#[tokio::test(start_paused = true)]
async fn commands_after_the_session_ends_are_rejected() {
    let flow = demo_flow();
    let handle = flow.begin(&ContestId::new("daily_001")).await.unwrap();

    handle.abandon().await;
    while !handle.is_finished() {
        tokio::task::yield_now().await;
    }
    assert!(!handle.submit().await);
    assert!(!handle.select(0).await);
}

#[tokio::test]
async fn starting_an_unknown_contest_fails() {
    let flow = demo_flow();
    let err = flow.begin(&ContestId::new("daily_999")).await.unwrap_err();
    assert!(matches!(
        err,
        services::SessionError::Data(DataError::NotFound)
    ));
}

/// Completion backend that always fails, to exercise the error path.
struct FailingCompletion;

#[async_trait]
impl ContestRepository for FailingCompletion {
    async fn list_contests(&self, _: Option<ContestType>) -> Result<Vec<Contest>, DataError> {
        Ok(Vec::new())
    }

    async fn get_contest(&self, _: &ContestId) -> Result<Contest, DataError> {
        Err(DataError::NotFound)
    }

    async fn enroll(&self, _: &ContestId) -> Result<Contest, DataError> {
        Err(DataError::NotFound)
    }

    async fn start_session(&self, id: &ContestId) -> Result<QuizSession, DataError> {
        let question = Question::new(
            QuestionId::new("q1"),
            "Pick anything",
            vec!["a".into(), "b".into()],
            0,
            30,
            10,
        )
        .map_err(DataError::invalid)?;
        Ok(QuizSession::new(id.clone(), "Flaky Contest", vec![question], 30))
    }

    async fn complete_session(
        &self,
        _: &ContestId,
        _: &AnswerMap,
        _: u64,
    ) -> Result<SessionResult, DataError> {
        Err(DataError::Api {
            status: 500,
            message: "scoring backend unavailable".into(),
        })
    }

    async fn contest_history(&self) -> Result<Vec<ContestHistoryEntry>, DataError> {
        Ok(Vec::new())
    }

    async fn contest_statistics(&self) -> Result<ContestStatistics, DataError> {
        Err(DataError::NotFound)
    }
}

#[tokio::test(start_paused = true)]
async fn completion_failure_surfaces_as_update_error() {
    let contests: Arc<dyn ContestRepository> = Arc::new(FailingCompletion);
    let payload = contests
        .start_session(&ContestId::new("flaky_001"))
        .await
        .unwrap();
    let engine = SessionEngine::start(payload, fixed_now()).unwrap();
    let handle = SessionRunner::new(contests, fixed_clock()).spawn(engine);

    handle.select(0).await;
    handle.submit().await;

    let last = handle.join().await;
    assert!(last.result.is_none());
    let error = last.error.unwrap();
    assert!(error.contains("scoring backend unavailable"));
}
