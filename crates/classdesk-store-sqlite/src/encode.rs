//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings; human-facing display
//! trims them to minute precision elsewhere (`classdesk_core::time`).
//! Booleans are stored as 0/1 integers, answer kinds as lowercase text.

use chrono::{DateTime, Utc};
use classdesk_core::{
  answer::{Answer, AnswerKind, AnswerPayload},
  question::{QuestionStatus, QuestionView},
  user::{ANONYMOUS, User},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── AnswerKind ──────────────────────────────────────────────────────────────

pub fn encode_answer_kind(k: AnswerKind) -> &'static str {
  match k {
    AnswerKind::Online => "online",
    AnswerKind::Offline => "offline",
  }
}

// ─── QuestionStatus ──────────────────────────────────────────────────────────

pub fn decode_status(is_closed: bool) -> QuestionStatus {
  if is_closed { QuestionStatus::Closed } else { QuestionStatus::Open }
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `users` row as read straight out of SQLite.
pub struct RawUser {
  pub user_id:           i64,
  pub username:          Option<String>,
  pub points:            i64,
  pub registration_date: String,
  pub is_headman:        bool,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id: self.user_id,
      username: self.username,
      points: self.points,
      registered_at: decode_dt(&self.registration_date)?,
      is_representative: self.is_headman,
    })
  }
}

/// A `questions` row joined with the author's username.
pub struct RawQuestionView {
  pub id:          i64,
  pub title:       String,
  pub description: Option<String>,
  pub is_closed:   bool,
  pub created_at:  String,
  /// NULL when the author id is null or the user row is missing.
  pub author:      Option<String>,
}

impl RawQuestionView {
  pub fn into_view(self) -> Result<QuestionView> {
    Ok(QuestionView {
      id: self.id,
      title: self.title,
      description: self.description,
      status: decode_status(self.is_closed),
      created_at: decode_dt(&self.created_at)?,
      author: self.author.unwrap_or_else(|| ANONYMOUS.to_owned()),
    })
  }
}


/// An `answers` row as read straight out of SQLite.
pub struct RawAnswer {
  pub id:           i64,
  pub question_id:  i64,
  pub responder_id: Option<i64>,
  pub answer_type:  String,
  pub contact_info: Option<String>,
  pub meeting_time: Option<String>,
  pub created_at:   String,
}

impl RawAnswer {
  /// Decode into the domain type, re-establishing the payload invariant.
  pub fn into_answer(self) -> Result<Answer> {
    let payload = match self.answer_type.as_str() {
      "online" => AnswerPayload::Online {
        contact: self.contact_info.ok_or(Error::MissingPayload(self.id))?,
      },
      "offline" => AnswerPayload::Offline {
        meeting_time: self.meeting_time.ok_or(Error::MissingPayload(self.id))?,
      },
      other => return Err(Error::UnknownAnswerType(other.to_owned())),
    };

    Ok(Answer {
      id: self.id,
      question_id: self.question_id,
      responder_id: self.responder_id,
      payload,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
