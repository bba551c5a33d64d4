use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use data::ContestRepository;
use quiz_core::model::SessionResult;
use quiz_core::Clock;

use super::engine::{Progress, SessionEngine, SessionSnapshot, TickOutcome};

const COMMAND_BUFFER: usize = 16;

/// Commands the presentation boundary can send into a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Tentatively select an option for the current question.
    Select(usize),
    /// Submit the current selection.
    Submit,
    /// Stop the session; no further ticks are delivered.
    Abandon,
}

/// State published after every engine transition.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub snapshot: SessionSnapshot,
    /// Present once the completed session has been scored.
    pub result: Option<SessionResult>,
    /// Present if the completion call failed; the session still ends.
    pub error: Option<String>,
}

impl SessionUpdate {
    fn running(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot,
            result: None,
            error: None,
        }
    }
}

/// Handle to a spawned session: commands in, state updates out.
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    updates: watch::Receiver<SessionUpdate>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Send a command; returns false once the session has ended.
    pub async fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub async fn select(&self, option: usize) -> bool {
        self.send(SessionCommand::Select(option)).await
    }

    pub async fn submit(&self) -> bool {
        self.send(SessionCommand::Submit).await
    }

    pub async fn abandon(&self) -> bool {
        self.send(SessionCommand::Abandon).await
    }

    /// Subscribe to state updates. `watch` semantics: a subscriber always
    /// sees the latest state, intermediate updates may be skipped.
    #[must_use]
    pub fn updates(&self) -> watch::Receiver<SessionUpdate> {
        self.updates.clone()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the session task to finish and return the last update.
    pub async fn join(self) -> SessionUpdate {
        let _ = self.task.await;
        self.updates.borrow().clone()
    }
}

/// Owns one engine on a dedicated task and wires it to real time.
///
/// The loop reacts to exactly two triggers: commands from the handle and
/// countdown ticks. Advancing to the next question rebuilds the interval, so
/// a stale tick can never carry over from the previous question; abandoning
/// or completing ends the loop and with it all tick delivery.
#[derive(Clone)]
pub struct SessionRunner {
    contests: Arc<dyn ContestRepository>,
    clock: Clock,
    tick_period: Duration,
}

impl SessionRunner {
    #[must_use]
    pub fn new(contests: Arc<dyn ContestRepository>, clock: Clock) -> Self {
        Self {
            contests,
            clock,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Override the one-second countdown step, for tests.
    #[must_use]
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Spawn the session loop and hand back its handle.
    #[must_use]
    pub fn spawn(&self, engine: SessionEngine) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (update_tx, update_rx) = watch::channel(SessionUpdate::running(engine.snapshot()));

        let contests = Arc::clone(&self.contests);
        let clock = self.clock;
        let tick_period = self.tick_period;
        let task = tokio::spawn(async move {
            run_session(engine, contests, clock, tick_period, command_rx, update_tx).await;
        });

        SessionHandle {
            commands: command_tx,
            updates: update_rx,
            task,
        }
    }
}

async fn run_session(
    mut engine: SessionEngine,
    contests: Arc<dyn ContestRepository>,
    clock: Clock,
    tick_period: Duration,
    mut commands: mpsc::Receiver<SessionCommand>,
    updates: watch::Sender<SessionUpdate>,
) {
    info!(contest = %engine.contest_id(), "session started");
    let mut countdown = new_countdown(tick_period);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(SessionCommand::Select(option)) => {
                    let outcome = engine.select_answer(option);
                    debug!(?outcome, "selection");
                    publish(&updates, &engine);
                }
                Some(SessionCommand::Submit) => match engine.submit_answer() {
                    Progress::Advanced => {
                        countdown = new_countdown(tick_period);
                        publish(&updates, &engine);
                    }
                    Progress::Completed => {
                        finish(&engine, contests.as_ref(), clock, &updates).await;
                        break;
                    }
                    Progress::Ignored(reason) => {
                        debug!(?reason, "submit ignored");
                    }
                },
                Some(SessionCommand::Abandon) | None => {
                    info!(contest = %engine.contest_id(), "session abandoned");
                    break;
                }
            },
            _ = countdown.tick() => match engine.tick() {
                TickOutcome::Running { remaining_secs } => {
                    debug!(remaining_secs, "tick");
                    publish(&updates, &engine);
                }
                TickOutcome::Advanced => {
                    countdown = new_countdown(tick_period);
                    publish(&updates, &engine);
                }
                TickOutcome::Completed => {
                    finish(&engine, contests.as_ref(), clock, &updates).await;
                    break;
                }
                TickOutcome::Ignored => {}
            },
        }
    }
}

/// A fresh countdown whose first tick lands one full period from now.
/// Assigning over the previous interval drops it, which is the
/// cancel-on-replace guarantee for per-question timers.
fn new_countdown(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn publish(updates: &watch::Sender<SessionUpdate>, engine: &SessionEngine) {
    let _ = updates.send(SessionUpdate::running(engine.snapshot()));
}

async fn finish(
    engine: &SessionEngine,
    contests: &dyn ContestRepository,
    clock: Clock,
    updates: &watch::Sender<SessionUpdate>,
) {
    let elapsed = clock.seconds_since(engine.started_at());
    match contests
        .complete_session(engine.contest_id(), engine.answers(), elapsed)
        .await
    {
        Ok(result) => {
            info!(
                contest = %engine.contest_id(),
                score = result.score(),
                rank = result.rank(),
                elapsed,
                "session completed"
            );
            let _ = updates.send(SessionUpdate {
                snapshot: engine.snapshot(),
                result: Some(result),
                error: None,
            });
        }
        Err(err) => {
            warn!(contest = %engine.contest_id(), %err, "session completion failed");
            let _ = updates.send(SessionUpdate {
                snapshot: engine.snapshot(),
                result: None,
                error: Some(err.to_string()),
            });
        }
    }
}
