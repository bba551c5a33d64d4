use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use data::{ContestRepository, DemoContestSource, DemoLeaderboard, LeaderboardRepository};
use quiz_core::model::{ContestId, ContestType};
use quiz_core::Clock;
use services::session::SessionFlow;
use services::{ContestService, LeaderboardService};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTickMs { raw: String },
    InvalidType { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTickMs { raw } => write!(f, "invalid --tick-ms value: {raw}"),
            ArgsError::InvalidType { raw } => write!(f, "invalid --type value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- contests    [--type <daily|weekly|monthly|special>]");
    eprintln!("  cargo run -p app -- play        [--contest-id <id>] [--tick-ms <ms>]");
    eprintln!("  cargo run -p app -- leaderboard [--limit <n>]");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  --contest-id daily_001");
    eprintln!("  --tick-ms 1000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CONTEST_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Contests,
    Play,
    Leaderboard,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "contests" => Some(Self::Contests),
            "play" => Some(Self::Play),
            "leaderboard" => Some(Self::Leaderboard),
            _ => None,
        }
    }
}

struct Args {
    contest_id: ContestId,
    tick_ms: u64,
    kind: Option<ContestType>,
    limit: u32,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut contest_id = std::env::var("QUIZ_CONTEST_ID")
            .ok()
            .map_or_else(|| ContestId::new("daily_001"), ContestId::new);
        let mut tick_ms = 1000;
        let mut kind = None;
        let mut limit = 5;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--contest-id" => {
                    contest_id = ContestId::new(require_value(args, "--contest-id")?);
                }
                "--tick-ms" => {
                    let value = require_value(args, "--tick-ms")?;
                    tick_ms = value
                        .parse::<u64>()
                        .ok()
                        .filter(|ms| *ms > 0)
                        .ok_or(ArgsError::InvalidTickMs { raw: value })?;
                }
                "--type" => {
                    let value = require_value(args, "--type")?;
                    kind = Some(
                        ContestType::parse(&value)
                            .map_err(|_| ArgsError::InvalidType { raw: value })?,
                    );
                }
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    limit = value
                        .parse()
                        .map_err(|_| ArgsError::UnknownArg(value.clone()))?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            contest_id,
            tick_ms,
            kind,
            limit,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play a session when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::default_clock();
    let contests: Arc<dyn ContestRepository> = Arc::new(DemoContestSource::new(clock));
    let leaderboard: Arc<dyn LeaderboardRepository> = Arc::new(DemoLeaderboard::new(clock));

    match cmd {
        Command::Contests => list_contests(&ContestService::new(contests), args.kind).await?,
        Command::Play => {
            play(contests, clock, &args).await?;
            show_leaderboard(&LeaderboardService::new(leaderboard), 5).await?;
        }
        Command::Leaderboard => {
            show_leaderboard(&LeaderboardService::new(leaderboard), args.limit).await?;
        }
    }

    Ok(())
}

async fn list_contests(
    service: &ContestService,
    kind: Option<ContestType>,
) -> Result<(), Box<dyn std::error::Error>> {
    let contests = service.list_contests(kind).await?;
    println!("{} contest(s):", contests.len());
    for contest in contests {
        println!(
            "  [{}] {}: {} {} ({} questions, {}s each, prize: {})",
            contest.status().as_str(),
            contest.id(),
            contest.difficulty().as_str(),
            contest.kind().as_str(),
            contest.total_questions(),
            contest.time_per_question_secs(),
            contest.prize_pool().unwrap_or("none"),
        );
    }
    Ok(())
}

async fn play(
    contests: Arc<dyn ContestRepository>,
    clock: Clock,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let flow = SessionFlow::new(contests, clock)
        .with_tick_period(Duration::from_millis(args.tick_ms));
    let handle = flow.begin(&args.contest_id).await?;
    let mut updates = handle.updates();

    println!(
        "Playing \"{}\" ({} questions)",
        updates.borrow().snapshot.contest_title,
        updates.borrow().snapshot.total_questions,
    );

    // Auto-play: always pick the first option. The countdown still runs; a
    // slow tick period makes this watchable, a fast one makes it instant.
    loop {
        let (index, complete, prompt) = {
            let update = updates.borrow();
            (
                update.snapshot.current_index,
                update.snapshot.is_complete,
                update.snapshot.question.as_ref().map(|q| q.prompt.clone()),
            )
        };
        if complete {
            break;
        }
        if let Some(prompt) = prompt {
            println!("  Q{}: {prompt}", index + 1);
        }
        handle.select(0).await;
        handle.submit().await;
        updates
            .wait_for(|u| u.snapshot.current_index > index || u.snapshot.is_complete)
            .await?;
    }

    let last = handle.join().await;
    match (last.result, last.error) {
        (Some(result), _) => {
            info!(contest = %result.contest_id(), "session scored");
            println!();
            println!("Result for \"{}\":", result.contest_title());
            println!(
                "  {}/{} correct ({:.1}% accuracy)",
                result.correct_answers(),
                result.total_questions(),
                result.accuracy(),
            );
            println!("  score {}/{}", result.score(), result.max_score());
            println!(
                "  rank {} of {} in {}s",
                result.rank(),
                result.total_participants(),
                result.time_taken_secs(),
            );
        }
        (None, Some(error)) => eprintln!("session failed: {error}"),
        (None, None) => eprintln!("session ended without a result"),
    }
    Ok(())
}

async fn show_leaderboard(
    service: &LeaderboardService,
    limit: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = service.top(limit).await?;
    println!();
    println!("Leaderboard (top {limit} of {}):", board.total_participants);
    for entry in &board.entries {
        println!(
            "  #{:<3} {:<20} {:>4} pts  {:>5.1}%",
            entry.rank, entry.username, entry.score, entry.accuracy,
        );
    }
    if let Some(me) = &board.current_user {
        println!("  you: #{} with {} pts", me.rank, me.score);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
