mod contest;
mod ids;
mod leaderboard;
mod question;
mod result;
mod score;
mod session;

pub use contest::{
    Contest, ContestDifficulty, ContestError, ContestHistoryEntry, ContestStatistics,
    ContestStatus, ContestType, MonthlyContestStat, WeeklyContestStat,
};
pub use ids::{AttemptId, ContestId, ParseAttemptIdError, QuestionId, UserId};
pub use leaderboard::{Badge, Leaderboard, LeaderboardEntry, PageInfo};
pub use question::{Question, QuestionError, MIN_OPTIONS};
pub use result::{ResultError, SessionResult};
pub use score::{AnswerMap, ScoreSheet};
pub use session::QuizSession;
