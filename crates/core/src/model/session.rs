use crate::model::{ContestId, Question};

/// The loaded payload for one quiz attempt: which contest, its title, the
/// ordered questions, and the per-question time budget.
///
/// The payload is immutable; mutable attempt state (current pointer, answers,
/// timestamps) is owned by the session engine in the services layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    contest_id: ContestId,
    contest_title: String,
    questions: Vec<Question>,
    time_per_question_secs: u32,
}

impl QuizSession {
    #[must_use]
    pub fn new(
        contest_id: ContestId,
        contest_title: impl Into<String>,
        questions: Vec<Question>,
        time_per_question_secs: u32,
    ) -> Self {
        Self {
            contest_id,
            contest_title: contest_title.into(),
            questions,
            time_per_question_secs,
        }
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
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question at `index`, or `None` past the end.
    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn time_per_question_secs(&self) -> u32 {
        self.time_per_question_secs
    }

    /// Sum of all question point values; the ceiling for any score.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::points).sum()
    }
}
