//! The `CampusStore` and `ScoreLedger` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `classdesk-store-sqlite`). Higher layers (`classdesk-service`,
//! `classdesk-admin`) depend on these abstractions, not on any concrete
//! backend. They are two traits, not one, because the backing stores are
//! deployed and rotated independently: the leaderboard can be reset
//! without touching user history.

use std::future::Future;

use crate::{
  answer::{Answer, NewAnswer, RejectOutcome},
  battle::{Battle, NewBattle},
  question::{NewQuestion, OpenQuestion, QuestionView},
  score::{ClassScore, LedgerHealth},
  user::User,
};

// ─── CampusStore ─────────────────────────────────────────────────────────────

/// Abstraction over the users/questions/answers/battles store.
///
/// Each method is one short-lived storage operation; multi-statement
/// invariants (answer save closes its question, answer rejection may reopen
/// it) are the implementation's responsibility and must be atomic.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait CampusStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Insert-or-ignore a user. Registering an existing id is a silent
  /// no-op: the display name and the representative flag are untouched.
  fn register_user(
    &self,
    user_id: i64,
    username: Option<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Set or clear the representative flag. Returns whether a user row
  /// matched; the caller decides whether a non-match is an error.
  fn set_representative(
    &self,
    user_id: i64,
    flag: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Whether `user_id` is a representative. `false` for missing rows —
  /// this feeds permission checks and must not fail on unknown ids.
  fn is_representative(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Fetch a user row. Returns `None` if not found.
  fn get_user(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Questions ─────────────────────────────────────────────────────────

  /// Persist a new question (always open) and return its id.
  fn create_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Fetch a question joined with its author's display name. Unknown id
  /// is a normal `None`, not an error.
  fn get_question(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<QuestionView>, Self::Error>> + Send + '_;

  /// List `(id, title)` for every open question, in stable id order.
  fn list_open(
    &self,
  ) -> impl Future<Output = Result<Vec<OpenQuestion>, Self::Error>> + Send + '_;

  // ── Answers ───────────────────────────────────────────────────────────

  /// Attach an answer and close the referenced question. The insert and
  /// the status flip must appear atomic to readers.
  fn save_answer(
    &self,
    input: NewAnswer,
  ) -> impl Future<Output = Result<Answer, Self::Error>> + Send + '_;

  /// All answers attached to a question.
  fn answers_for(
    &self,
    question_id: i64,
  ) -> impl Future<Output = Result<Vec<Answer>, Self::Error>> + Send + '_;

  /// Delete an answer; reopen its question iff no answers remain. The
  /// delete, the count, and the conditional reopen are one atomic unit.
  /// Errors if the answer does not exist.
  fn reject_answer(
    &self,
    answer_id: i64,
  ) -> impl Future<Output = Result<RejectOutcome, Self::Error>> + Send + '_;

  // ── Battles ───────────────────────────────────────────────────────────

  /// Persist a new, unaccepted wager. Permission gating happens above.
  fn open_battle(
    &self,
    input: NewBattle,
  ) -> impl Future<Output = Result<Battle, Self::Error>> + Send + '_;
}

// ─── ScoreLedger ─────────────────────────────────────────────────────────────

/// Abstraction over the class leaderboard store.
pub trait ScoreLedger: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Accumulate `delta` onto `class_name`, creating the row lazily on
  /// first sight. Must be a single atomic upsert — concurrent callers for
  /// the same class must not lose updates. Returns the new total.
  fn add_score<'a>(
    &'a self,
    class_name: &'a str,
    delta: i64,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + 'a;

  /// All classes ordered by total descending, name ascending on ties.
  fn ranking(
    &self,
  ) -> impl Future<Output = Result<Vec<ClassScore>, Self::Error>> + Send + '_;

  /// Reachability probe plus row count, for operational health reporting.
  fn health(
    &self,
  ) -> impl Future<Output = Result<LedgerHealth, Self::Error>> + Send + '_;
}
