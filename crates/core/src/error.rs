use thiserror::Error;

use crate::model::{ContestError, QuestionError, ResultError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Contest(#[from] ContestError),
    #[error(transparent)]
    Result(#[from] ResultError),
}
