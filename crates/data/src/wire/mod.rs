//! Wire DTOs and the response envelope shared by the demo source and the
//! remote client. Mapping into domain types validates and fails with
//! `DataError::Invalid`.

mod contest;
mod envelope;
mod leaderboard;

pub use contest::{
    ContestDto, ContestListDto, HistoryEntryDto, MonthlyStatDto, QuestionDto,
    ResultDto, SessionDto, StatisticsDto, WeeklyStatDto,
};
pub use envelope::{ApiResponse, PaginationDto};
pub use leaderboard::{LeaderboardDataDto, LeaderboardEntryDto};
