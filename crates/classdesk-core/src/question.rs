//! Question — a student request waiting for a representative.
//!
//! A question is *open* until an answer is attached and *closed* while at
//! least one answer remains; rejecting the last answer reopens it. The
//! status is never set directly by callers — the store maintains it as part
//! of the answer write paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Upper bound on question title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// The two lifecycle states of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
  Open,
  Closed,
}

impl QuestionStatus {
  pub fn is_closed(self) -> bool { matches!(self, QuestionStatus::Closed) }
}

/// A persisted question row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
  pub id:          i64,
  /// Weak reference to the author; `None` renders as "Anonymous".
  pub author_id:   Option<i64>,
  pub title:       String,
  pub description: Option<String>,
  pub status:      QuestionStatus,
  pub created_at:  DateTime<Utc>,
}

/// A question joined with its author's display name, as shown to readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
  pub id:          i64,
  pub title:       String,
  pub description: Option<String>,
  pub status:      QuestionStatus,
  pub created_at:  DateTime<Utc>,
  /// Author username, or "Anonymous" when the author id is null or the
  /// user row is missing.
  pub author:      String,
}

/// The `(id, title)` pair returned by the open-question listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenQuestion {
  pub id:    i64,
  pub title: String,
}

/// Input for creating a question. Validated before it reaches a store.
#[derive(Debug, Clone)]
pub struct NewQuestion {
  pub author_id:   Option<i64>,
  pub title:       String,
  pub description: Option<String>,
}

impl NewQuestion {
  /// Build a new question, enforcing the title length bound.
  pub fn new(
    author_id: Option<i64>,
    title: impl Into<String>,
    description: Option<String>,
  ) -> Result<Self> {
    let title = title.into();
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
      return Err(Error::TitleTooLong(len));
    }
    Ok(Self { author_id, title, description })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_at_limit_is_accepted() {
    let title = "q".repeat(MAX_TITLE_LEN);
    assert!(NewQuestion::new(Some(1), title, None).is_ok());
  }

  #[test]
  fn title_over_limit_is_rejected() {
    let title = "q".repeat(MAX_TITLE_LEN + 1);
    let err = NewQuestion::new(Some(1), title, None).unwrap_err();
    assert_eq!(err, Error::TitleTooLong(MAX_TITLE_LEN + 1));
  }

  #[test]
  fn title_limit_counts_chars_not_bytes() {
    // 100 two-byte characters must pass.
    let title = "й".repeat(MAX_TITLE_LEN);
    assert!(NewQuestion::new(None, title, None).is_ok());
  }
}
