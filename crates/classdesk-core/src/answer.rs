//! Answer — a representative's response to a question.
//!
//! The original schema stores `answer_type` alongside two nullable payload
//! columns (`contact_info`, `meeting_time`) with the rule that exactly one
//! is populated. Here the payload is a sum type, so the rule is structural
//! and cannot drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the representative will deliver the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
  Online,
  Offline,
}

/// The kind-specific payload of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnswerPayload {
  /// Answered online; carries the contact the student should reach out to.
  Online { contact: String },
  /// Answered in person; carries the agreed meeting time as free text.
  Offline { meeting_time: String },
}

impl AnswerPayload {
  pub fn kind(&self) -> AnswerKind {
    match self {
      AnswerPayload::Online { .. } => AnswerKind::Online,
      AnswerPayload::Offline { .. } => AnswerKind::Offline,
    }
  }
}

/// A persisted answer row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
  pub id:           i64,
  pub question_id:  i64,
  /// Weak reference to the responding representative.
  pub responder_id: Option<i64>,
  pub payload:      AnswerPayload,
  pub created_at:   DateTime<Utc>,
}

/// Input for attaching an answer to a question.
#[derive(Debug, Clone)]
pub struct NewAnswer {
  pub question_id:  i64,
  pub responder_id: Option<i64>,
  pub payload:      AnswerPayload,
}

impl NewAnswer {
  pub fn online(
    question_id: i64,
    responder_id: i64,
    contact: impl Into<String>,
  ) -> Self {
    Self {
      question_id,
      responder_id: Some(responder_id),
      payload: AnswerPayload::Online { contact: contact.into() },
    }
  }

  pub fn offline(
    question_id: i64,
    responder_id: i64,
    meeting_time: impl Into<String>,
  ) -> Self {
    Self {
      question_id,
      responder_id: Some(responder_id),
      payload: AnswerPayload::Offline { meeting_time: meeting_time.into() },
    }
  }
}

/// The result of rejecting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectOutcome {
  /// The question the deleted answer belonged to.
  pub question_id: i64,
  /// Answers still attached to that question after the delete.
  pub remaining:   u64,
  /// True iff `remaining == 0` and the question was flipped back to open.
  pub reopened:    bool,
}
