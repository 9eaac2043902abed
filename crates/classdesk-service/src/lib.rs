//! Query façade for classdesk.
//!
//! [`DeskService`] is the single entry point the collaborating chat layer
//! uses. It composes the two stores, owns every permission check, and is
//! solely responsible for the cross-entity invariants (an answer save
//! closes its question; a rejection may reopen it) — callers never flip
//! question status themselves.

pub mod error;
pub mod export;

use std::sync::Arc;

use classdesk_core::{
  answer::{Answer, NewAnswer, RejectOutcome},
  battle::{Battle, NewBattle},
  question::{NewQuestion, OpenQuestion, QuestionView},
  score::{ClassScore, LedgerHealth, ScoreDelta},
  store::{CampusStore, ScoreLedger},
  user::User,
};

pub use error::{Error, Result};

/// The façade over both stores plus the admin allow-list.
///
/// Generic over the store backends; production wires in the SQLite
/// implementations, tests may substitute anything satisfying the traits.
#[derive(Clone)]
pub struct DeskService<C, L> {
  campus: Arc<C>,
  ledger: Arc<L>,
  /// Platform ids allowed to run admin actions; from configuration.
  admins: Vec<i64>,
}

impl<C, L> DeskService<C, L>
where
  C: CampusStore,
  L: ScoreLedger,
{
  pub fn new(campus: Arc<C>, ledger: Arc<L>, admins: Vec<i64>) -> Self {
    Self { campus, ledger, admins }
  }

  // ── Permissions ───────────────────────────────────────────────────────────

  pub fn is_admin(&self, user_id: i64) -> bool {
    self.admins.contains(&user_id)
  }

  fn ensure_admin(&self, user_id: i64) -> Result<()> {
    if self.is_admin(user_id) {
      Ok(())
    } else {
      Err(Error::PermissionDenied(user_id))
    }
  }

  async fn ensure_representative(&self, user_id: i64) -> Result<()> {
    let ok = self
      .campus
      .is_representative(user_id)
      .await
      .map_err(Error::store)?;
    if ok { Ok(()) } else { Err(Error::PermissionDenied(user_id)) }
  }

  // ── User directory ────────────────────────────────────────────────────────

  /// Record a user on first contact. Safe to call on every interaction.
  pub async fn register_user(
    &self,
    user_id: i64,
    username: Option<String>,
  ) -> Result<()> {
    self
      .campus
      .register_user(user_id, username)
      .await
      .map_err(Error::store)
  }

  pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
    self.campus.get_user(user_id).await.map_err(Error::store)
  }

  pub async fn is_representative(&self, user_id: i64) -> Result<bool> {
    self
      .campus
      .is_representative(user_id)
      .await
      .map_err(Error::store)
  }

  /// Admin-gated. Targeting a user the directory has never seen is an
  /// error here, even though the store treats it as a no-op update.
  pub async fn set_representative(
    &self,
    admin_id: i64,
    user_id: i64,
    flag: bool,
  ) -> Result<()> {
    self.ensure_admin(admin_id)?;
    let matched = self
      .campus
      .set_representative(user_id, flag)
      .await
      .map_err(Error::store)?;
    if !matched {
      return Err(Error::UserNotFound(user_id));
    }
    tracing::info!(user_id, flag, "representative flag updated");
    Ok(())
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  /// Post a question. Title length is validated here, before storage.
  pub async fn ask_question(
    &self,
    author_id: Option<i64>,
    title: impl Into<String>,
    description: Option<String>,
  ) -> Result<i64> {
    let input = NewQuestion::new(author_id, title, description)?;
    self.campus.create_question(input).await.map_err(Error::store)
  }

  /// Unknown id is a normal `None`, not an error.
  pub async fn question(&self, id: i64) -> Result<Option<QuestionView>> {
    self.campus.get_question(id).await.map_err(Error::store)
  }

  pub async fn open_questions(&self) -> Result<Vec<OpenQuestion>> {
    self.campus.list_open().await.map_err(Error::store)
  }

  // ── Answers ───────────────────────────────────────────────────────────────

  /// Representative-gated: attach an online answer and close the question.
  pub async fn answer_online(
    &self,
    responder_id: i64,
    question_id: i64,
    contact: impl Into<String>,
  ) -> Result<Answer> {
    self.ensure_representative(responder_id).await?;
    self
      .campus
      .save_answer(NewAnswer::online(question_id, responder_id, contact))
      .await
      .map_err(Error::store)
  }

  /// Representative-gated: attach an in-person answer and close the question.
  pub async fn answer_offline(
    &self,
    responder_id: i64,
    question_id: i64,
    meeting_time: impl Into<String>,
  ) -> Result<Answer> {
    self.ensure_representative(responder_id).await?;
    self
      .campus
      .save_answer(NewAnswer::offline(question_id, responder_id, meeting_time))
      .await
      .map_err(Error::store)
  }

  pub async fn answers_for(&self, question_id: i64) -> Result<Vec<Answer>> {
    self.campus.answers_for(question_id).await.map_err(Error::store)
  }

  /// Delete an answer; the store reopens the question iff it was the last
  /// one. Atomicity lives in the store, the decision to expose one
  /// operation (instead of delete-then-maybe-reopen at every call site)
  /// lives here.
  pub async fn reject_answer(&self, answer_id: i64) -> Result<RejectOutcome> {
    let outcome = self
      .campus
      .reject_answer(answer_id)
      .await
      .map_err(Error::store)?;
    if outcome.reopened {
      tracing::info!(question_id = outcome.question_id, "question reopened");
    }
    Ok(outcome)
  }

  // ── Battles ───────────────────────────────────────────────────────────────

  /// Representative-gated: open a point wager against another user.
  pub async fn open_battle(
    &self,
    initiator_id: i64,
    receiver_id: i64,
    points: i64,
    comment: Option<String>,
  ) -> Result<Battle> {
    self.ensure_representative(initiator_id).await?;
    self
      .campus
      .open_battle(NewBattle { initiator_id, receiver_id, points, comment })
      .await
      .map_err(Error::store)
  }

  // ── Score ledger ──────────────────────────────────────────────────────────

  /// Admin-gated: parse `<class> <points>` and accumulate. Returns the
  /// parsed delta and the class's new total.
  pub async fn add_score_text(
    &self,
    admin_id: i64,
    input: &str,
  ) -> Result<(ScoreDelta, i64)> {
    self.ensure_admin(admin_id)?;
    let delta = ScoreDelta::parse(input)?;
    let total = self
      .ledger
      .add_score(&delta.class_name, delta.score)
      .await
      .map_err(Error::store)?;
    tracing::info!(class = %delta.class_name, delta = delta.score, total, "score added");
    Ok((delta, total))
  }

  pub async fn ranking(&self) -> Result<Vec<ClassScore>> {
    self.ledger.ranking().await.map_err(Error::store)
  }

  pub async fn ledger_health(&self) -> Result<LedgerHealth> {
    self.ledger.health().await.map_err(Error::store)
  }

  /// The ranking shaped for spreadsheet export: header list plus rows.
  pub async fn ranking_export(&self) -> Result<(Vec<&'static str>, Vec<Vec<serde_json::Value>>)> {
    let ranking = self.ranking().await?;
    Ok((export::RANKING_COLUMNS.to_vec(), export::ranking_rows(&ranking)))
  }
}
