//! [`SqliteCampusStore`] — the SQLite implementation of [`CampusStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use classdesk_core::{
  answer::{Answer, AnswerPayload, NewAnswer, RejectOutcome},
  battle::{Battle, NewBattle},
  question::{NewQuestion, OpenQuestion, QuestionView},
  store::CampusStore,
  user::User,
};

use crate::{
  Error, Result,
  encode::{RawAnswer, RawQuestionView, RawUser, encode_answer_kind, encode_dt},
  schema::USERS_SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The users/questions/answers/battles store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// are serialised on the connection's dedicated thread, so a multi-statement
/// transaction inside one `call` closure cannot interleave with another
/// operation on the same store.
#[derive(Clone)]
pub struct SqliteCampusStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteCampusStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Schema failure here is fatal by design: the caller aborts startup.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(USERS_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CampusStore impl ────────────────────────────────────────────────────────

impl CampusStore for SqliteCampusStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn register_user(
    &self,
    user_id: i64,
    username: Option<String>,
  ) -> Result<()> {
    let at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO users (user_id, username, registration_date)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![user_id, username, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn set_representative(&self, user_id: i64, flag: bool) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE users SET is_headman = ?2 WHERE user_id = ?1",
          rusqlite::params![user_id, flag],
        )?;
        Ok(n)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn is_representative(&self, user_id: i64) -> Result<bool> {
    let flag: Option<bool> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT is_headman FROM users WHERE user_id = ?1",
              rusqlite::params![user_id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    // Missing rows read as "not a representative", never as an error.
    Ok(flag.unwrap_or(false))
  }

  async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username, points, registration_date, is_headman
               FROM users WHERE user_id = ?1",
              rusqlite::params![user_id],
              |row| {
                Ok(RawUser {
                  user_id:           row.get(0)?,
                  username:          row.get(1)?,
                  points:            row.get(2)?,
                  registration_date: row.get(3)?,
                  is_headman:        row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn create_question(&self, input: NewQuestion) -> Result<i64> {
    let at_str = encode_dt(Utc::now());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO questions (author_id, title, description, is_closed, created_at)
           VALUES (?1, ?2, ?3, 0, ?4)",
          rusqlite::params![input.author_id, input.title, input.description, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  async fn get_question(&self, id: i64) -> Result<Option<QuestionView>> {
    let raw: Option<RawQuestionView> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT q.id, q.title, q.description, q.is_closed, q.created_at,
                      u.username
               FROM questions q
               LEFT JOIN users u ON u.user_id = q.author_id
               WHERE q.id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawQuestionView {
                  id:          row.get(0)?,
                  title:       row.get(1)?,
                  description: row.get(2)?,
                  is_closed:   row.get(3)?,
                  created_at:  row.get(4)?,
                  author:      row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawQuestionView::into_view).transpose()
  }

  async fn list_open(&self) -> Result<Vec<OpenQuestion>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT id, title FROM questions WHERE is_closed = 0 ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(OpenQuestion { id: row.get(0)?, title: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  // ── Answers ───────────────────────────────────────────────────────────────

  async fn save_answer(&self, input: NewAnswer) -> Result<Answer> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);

    let NewAnswer { question_id, responder_id, payload } = input;
    let kind_str = encode_answer_kind(payload.kind()).to_owned();
    let (contact_info, meeting_time) = match &payload {
      AnswerPayload::Online { contact } => (Some(contact.clone()), None),
      AnswerPayload::Offline { meeting_time } => (None, Some(meeting_time.clone())),
    };

    // Insert + close must appear atomic to readers.
    let answer_id: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: bool = tx
          .query_row(
            "SELECT 1 FROM questions WHERE id = ?1",
            rusqlite::params![question_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !exists {
          return Ok(None);
        }

        tx.execute(
          "INSERT INTO answers
             (question_id, responder_id, answer_type, contact_info, meeting_time, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            question_id,
            responder_id,
            kind_str,
            contact_info,
            meeting_time,
            at_str,
          ],
        )?;
        let id = tx.last_insert_rowid();

        tx.execute(
          "UPDATE questions SET is_closed = 1 WHERE id = ?1",
          rusqlite::params![question_id],
        )?;

        tx.commit()?;
        Ok(Some(id))
      })
      .await?;

    let id = answer_id.ok_or(Error::QuestionNotFound(question_id))?;
    Ok(Answer { id, question_id, responder_id, payload, created_at })
  }

  async fn answers_for(&self, question_id: i64) -> Result<Vec<Answer>> {
    let raws: Vec<RawAnswer> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, question_id, responder_id, answer_type,
                  contact_info, meeting_time, created_at
           FROM answers WHERE question_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![question_id], |row| {
            Ok(RawAnswer {
              id:           row.get(0)?,
              question_id:  row.get(1)?,
              responder_id: row.get(2)?,
              answer_type:  row.get(3)?,
              contact_info: row.get(4)?,
              meeting_time: row.get(5)?,
              created_at:   row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnswer::into_answer).collect()
  }

  async fn reject_answer(&self, answer_id: i64) -> Result<RejectOutcome> {
    // Delete, count, and conditional reopen are one transaction. The parent
    // question id is captured before the delete — afterwards the row is
    // gone and there is nothing left to look it up on.
    let outcome: Option<RejectOutcome> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let question_id: Option<i64> = tx
          .query_row(
            "SELECT question_id FROM answers WHERE id = ?1",
            rusqlite::params![answer_id],
            |row| row.get(0),
          )
          .optional()?;
        let Some(question_id) = question_id else {
          return Ok(None);
        };

        tx.execute("DELETE FROM answers WHERE id = ?1", rusqlite::params![answer_id])?;

        let remaining: u64 = tx.query_row(
          "SELECT COUNT(*) FROM answers WHERE question_id = ?1",
          rusqlite::params![question_id],
          |row| row.get(0),
        )?;

        let reopened = remaining == 0;
        if reopened {
          tx.execute(
            "UPDATE questions SET is_closed = 0 WHERE id = ?1",
            rusqlite::params![question_id],
          )?;
        }

        tx.commit()?;
        Ok(Some(RejectOutcome { question_id, remaining, reopened }))
      })
      .await?;

    outcome.ok_or(Error::AnswerNotFound(answer_id))
  }

  // ── Battles ───────────────────────────────────────────────────────────────

  async fn open_battle(&self, input: NewBattle) -> Result<Battle> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);

    let NewBattle { initiator_id, receiver_id, points, comment } = input;
    let comment_param = comment.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO battles
             (initiator_id, receiver_id, points, is_accepted, comment, created_at)
           VALUES (?1, ?2, ?3, 0, ?4, ?5)",
          rusqlite::params![initiator_id, receiver_id, points, comment_param, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Battle {
      id,
      initiator_id,
      receiver_id,
      points,
      is_accepted: false,
      comment,
      winner: None,
      created_at,
      over_at: None,
    })
  }
}
