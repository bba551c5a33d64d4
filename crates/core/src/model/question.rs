use thiserror::Error;

use crate::model::QuestionId;

/// Minimum number of answer options a question must carry.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question has {got} options, needs at least {MIN_OPTIONS}")]
    TooFewOptions { got: usize },

    #[error("correct answer index {index} out of range for {options} options")]
    CorrectIndexOutOfRange { index: usize, options: usize },

    #[error("time limit must be positive")]
    ZeroTimeLimit,
}

/// One multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    time_limit_secs: u32,
    points: u32,
}

impl Question {
    /// Build a question, validating prompt, option count, correct index,
    /// and time limit.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when any field fails validation.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        time_limit_secs: u32,
        points: u32,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions { got: options.len() });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                options: options.len(),
            });
        }
        if time_limit_secs == 0 {
            return Err(QuestionError::ZeroTimeLimit);
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
            time_limit_secs,
            points,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Whether `selected` is a valid index into this question's options.
    #[must_use]
    pub fn accepts_option(&self, selected: usize) -> bool {
        selected < self.options.len()
    }

    /// Whether the selected option is the correct one.
    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}
