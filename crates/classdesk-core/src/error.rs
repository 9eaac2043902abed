//! Error types for `classdesk-core`.

use thiserror::Error;

use crate::question::MAX_TITLE_LEN;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// Score input did not split into exactly `<class> <points>`.
  #[error("expected `<class> <points>`, got {0} token(s)")]
  ScoreTokenCount(usize),

  /// The points token of a score input was not an integer.
  #[error("points value {0:?} is not an integer")]
  ScoreNotInteger(String),

  #[error("question title is {0} characters long (limit {MAX_TITLE_LEN})")]
  TitleTooLong(usize),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("question not found: {0}")]
  QuestionNotFound(i64),

  #[error("answer not found: {0}")]
  AnswerNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
