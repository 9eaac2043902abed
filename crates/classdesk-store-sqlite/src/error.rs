//! Error type for `classdesk-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] classdesk_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown answer type discriminant: {0:?}")]
  UnknownAnswerType(String),

  /// An answer row with an `answer_type` whose payload column is NULL.
  #[error("answer {0} has no payload for its answer type")]
  MissingPayload(i64),

  /// Attempted to reject an answer that was not found.
  #[error("answer not found: {0}")]
  AnswerNotFound(i64),

  /// Attempted to attach an answer to a question that was not found.
  #[error("question not found: {0}")]
  QuestionNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
