use data::{ContestRepository, DemoContestSource, DemoLeaderboard, DataError, Latency, LeaderboardRepository};
use quiz_core::model::{AnswerMap, Badge, ContestId, ContestType, QuestionId};
use quiz_core::time::fixed_clock;

fn contest_source() -> DemoContestSource {
    DemoContestSource::new(fixed_clock()).with_latency(Latency::none())
}

fn leaderboard_source() -> DemoLeaderboard {
    DemoLeaderboard::new(fixed_clock()).with_latency(Latency::none())
}

#[tokio::test]
async fn lists_full_catalog_and_filters_by_type() {
    let source = contest_source();

    let all = source.list_contests(None).await.unwrap();
    assert_eq!(all.len(), 6);

    let daily = source
        .list_contests(Some(ContestType::Daily))
        .await
        .unwrap();
    assert_eq!(daily.len(), 2);
    assert!(daily.iter().all(|c| c.kind() == ContestType::Daily));
}

#[tokio::test]
async fn unknown_contest_is_not_found() {
    let source = contest_source();
    let missing = ContestId::new("daily_999");

    assert!(matches!(
        source.get_contest(&missing).await,
        Err(DataError::NotFound)
    ));
    assert!(matches!(
        source.start_session(&missing).await,
        Err(DataError::NotFound)
    ));
}

#[tokio::test]
async fn enrollment_flips_flag_and_persists() {
    let source = contest_source();
    let id = ContestId::new("daily_001");

    let before = source.get_contest(&id).await.unwrap();
    assert!(!before.is_enrolled());
    assert_eq!(before.enrolled_count(), 450);

    let enrolled = source.enroll(&id).await.unwrap();
    assert!(enrolled.is_enrolled());
    assert_eq!(enrolled.enrolled_count(), 451);

    // Enrolling again does not bump the count, and the change sticks across
    // reads.
    let again = source.enroll(&id).await.unwrap();
    assert_eq!(again.enrolled_count(), 451);
    let after = source.get_contest(&id).await.unwrap();
    assert!(after.is_enrolled());
}

#[tokio::test]
async fn session_payload_matches_contest() {
    let source = contest_source();
    let id = ContestId::new("daily_001");

    let session = source.start_session(&id).await.unwrap();
    assert_eq!(session.contest_id(), &id);
    assert_eq!(session.contest_title(), "Daily Quiz Challenge");
    assert_eq!(session.question_count(), 5);
    assert_eq!(session.time_per_question_secs(), 30);
}

#[tokio::test]
async fn completion_grades_answers_and_echoes_elapsed() {
    let source = contest_source();
    let id = ContestId::new("daily_001");

    // Two correct answers (q1 -> Paris, q2 -> Mars), one wrong, two absent.
    let mut answers = AnswerMap::new();
    answers.insert(QuestionId::new("q1"), Some(2));
    answers.insert(QuestionId::new("q2"), Some(1));
    answers.insert(QuestionId::new("q3"), Some(0));

    let result = source.complete_session(&id, &answers, 95).await.unwrap();
    assert_eq!(result.total_questions(), 5);
    assert_eq!(result.correct_answers(), 2);
    assert_eq!(result.wrong_answers(), 3);
    assert_eq!(result.score(), 20);
    assert_eq!(result.max_score(), 50);
    assert!((result.accuracy() - 40.0).abs() < f64::EPSILON);
    assert_eq!(result.time_taken_secs(), 95);
    assert!((1..=100).contains(&result.rank()));
    assert_eq!(result.total_participants(), 500);
}

#[tokio::test]
async fn statistics_aggregate_history() {
    let source = contest_source();

    let history = source.contest_history().await.unwrap();
    assert_eq!(history.len(), 5);

    let stats = source.contest_statistics().await.unwrap();
    assert_eq!(stats.contests_played, 5);
    assert_eq!(stats.best_rank, 8);
    assert_eq!(stats.total_points, 630);
    assert_eq!(stats.average_rank, 25.0);
    assert_eq!(stats.weekly.len(), 4);
    assert_eq!(stats.monthly.len(), 3);
}

#[tokio::test]
async fn leaderboard_pages_carry_metadata() {
    let source = leaderboard_source();

    let page = source.page(2, 4).await.unwrap();
    assert_eq!(page.entries.len(), 4);
    assert_eq!(page.entries[0].rank, 5);

    let info = page.page.unwrap();
    assert_eq!(info.current_page, 2);
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.total_items, 10);
    assert!(info.has_next);
    assert!(info.has_previous);
}

#[tokio::test]
async fn leaderboard_top_derives_badges() {
    let source = leaderboard_source();

    let board = source.top(3).await.unwrap();
    let badges: Vec<Badge> = board.entries.iter().map(|e| e.badge).collect();
    assert_eq!(badges, vec![Badge::Gold, Badge::Silver, Badge::Bronze]);
    assert_eq!(board.total_participants, 1250);
    assert_eq!(board.current_user.unwrap().rank, 12);
}

#[tokio::test]
async fn page_past_end_is_empty() {
    let source = leaderboard_source();

    let page = source.page(5, 10).await.unwrap();
    assert!(page.entries.is_empty());
    assert!(!page.page.unwrap().has_next);
}

#[tokio::test]
async fn refresh_returns_first_page() {
    let source = leaderboard_source();

    let board = source.refresh().await.unwrap();
    assert_eq!(board.entries.len(), 10);
    assert_eq!(board.entries[0].rank, 1);
}
