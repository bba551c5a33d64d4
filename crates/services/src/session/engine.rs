use chrono::{DateTime, Utc};

use quiz_core::model::{AnswerMap, AttemptId, ContestId, QuestionId, QuizSession};

use crate::error::SessionError;

/// Why an operation had no effect. Out-of-state calls are reported, never
/// surfaced as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The session already reached its terminal state.
    SessionComplete,
    /// Submit was called with no option selected.
    NoSelection,
    /// The selected index is not a valid option for the current question.
    OptionOutOfRange,
}

/// Outcome of [`SessionEngine::select_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tentative selection was recorded; the pointer did not move.
    Recorded { option: usize },
    Ignored(IgnoredReason),
}

/// Outcome of [`SessionEngine::submit_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The answer was stored and the pointer moved to the next question,
    /// with a fresh countdown.
    Advanced,
    /// The last question was answered; the session is complete.
    Completed,
    Ignored(IgnoredReason),
}

/// Outcome of one [`SessionEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown decremented and the question is still open.
    Running { remaining_secs: u32 },
    /// The countdown expired; the question was recorded as unanswered and the
    /// pointer advanced.
    Advanced,
    /// The countdown expired on the last question; the session is complete.
    Completed,
    /// Tick delivered after completion; dropped.
    Ignored,
}

/// Read-only view of the current question for the presentation boundary.
/// Deliberately omits the correct answer index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub points: u32,
}

/// Point-in-time state of a session, safe to hand to any caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub attempt_id: AttemptId,
    pub contest_id: ContestId,
    pub contest_title: String,
    /// 0-based pointer; equals `total_questions` only when complete.
    pub current_index: usize,
    pub total_questions: usize,
    pub question: Option<QuestionView>,
    pub time_remaining_secs: u32,
    pub selection: Option<usize>,
    pub answered: usize,
    pub is_complete: bool,
}

/// State machine for one timed quiz attempt.
///
/// Drives progression through a fixed ordered question list under a
/// per-question countdown: collects one answer per question (or records a
/// timeout as unanswered) and carries the final answer map once complete.
/// Grading and rank assignment happen elsewhere; the engine never sees them.
///
/// The engine is synchronous; time enters only through [`tick`], so unit
/// tests drive the countdown without sleeping. [`super::SessionRunner`] wires
/// it to a real timer.
///
/// [`tick`]: SessionEngine::tick
#[derive(Debug)]
pub struct SessionEngine {
    attempt: AttemptId,
    session: QuizSession,
    started_at: DateTime<Utc>,
    current: usize,
    remaining_secs: u32,
    selection: Option<usize>,
    answers: AnswerMap,
    complete: bool,
}

impl SessionEngine {
    /// Begin the attempt at question 0 with a running countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptySession` if the payload has no questions.
    pub fn start(session: QuizSession, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if session.is_empty() {
            return Err(SessionError::EmptySession);
        }
        let remaining_secs = session.time_per_question_secs();
        Ok(Self {
            attempt: AttemptId::generate(),
            session,
            started_at,
            current: 0,
            remaining_secs,
            selection: None,
            answers: AnswerMap::new(),
            complete: false,
        })
    }

    /// Record a tentative selection for the current question.
    ///
    /// Re-selecting overwrites the previous choice; nothing advances until
    /// [`submit_answer`](Self::submit_answer) or the countdown expires.
    pub fn select_answer(&mut self, option: usize) -> SelectOutcome {
        if self.complete {
            return SelectOutcome::Ignored(IgnoredReason::SessionComplete);
        }
        let accepts = self
            .session
            .question(self.current)
            .is_some_and(|q| q.accepts_option(option));
        if !accepts {
            return SelectOutcome::Ignored(IgnoredReason::OptionOutOfRange);
        }
        self.selection = Some(option);
        SelectOutcome::Recorded { option }
    }

    /// Store the current selection and move on, or complete the session if
    /// this was the last question.
    pub fn submit_answer(&mut self) -> Progress {
        if self.complete {
            return Progress::Ignored(IgnoredReason::SessionComplete);
        }
        match self.selection {
            Some(option) => self.record_and_advance(Some(option)),
            None => Progress::Ignored(IgnoredReason::NoSelection),
        }
    }

    /// One countdown step. At zero the current question is recorded as
    /// unanswered (a tentative selection that was never submitted is
    /// discarded) and the machine advances exactly as a submit would.
    pub fn tick(&mut self) -> TickOutcome {
        if self.complete {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            };
        }
        match self.record_and_advance(None) {
            Progress::Completed => TickOutcome::Completed,
            _ => TickOutcome::Advanced,
        }
    }

    fn record_and_advance(&mut self, selected: Option<usize>) -> Progress {
        let Some(question) = self.session.question(self.current) else {
            return Progress::Ignored(IgnoredReason::SessionComplete);
        };
        self.answers.insert(question.id().clone(), selected);
        self.selection = None;
        self.current += 1;

        if self.current >= self.session.question_count() {
            self.complete = true;
            self.remaining_secs = 0;
            Progress::Completed
        } else {
            self.remaining_secs = self.session.time_per_question_secs();
            Progress::Advanced
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let question = self.session.question(self.current).map(|q| QuestionView {
            id: q.id().clone(),
            prompt: q.prompt().to_owned(),
            options: q.options().to_vec(),
            points: q.points(),
        });
        SessionSnapshot {
            attempt_id: self.attempt,
            contest_id: self.session.contest_id().clone(),
            contest_title: self.session.contest_title().to_owned(),
            current_index: self.current,
            total_questions: self.session.question_count(),
            question,
            time_remaining_secs: self.remaining_secs,
            selection: self.selection,
            answered: self.answers.len(),
            is_complete: self.complete,
        }
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt
    }

    #[must_use]
    pub fn contest_id(&self) -> &ContestId {
        self.session.contest_id()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.remaining_secs
    }
}
