//! Integration tests for the SQLite stores against in-memory databases.

use classdesk_core::{
  answer::{AnswerPayload, NewAnswer},
  battle::NewBattle,
  question::{NewQuestion, QuestionStatus},
  store::{CampusStore, ScoreLedger},
  user::ANONYMOUS,
};

use crate::{Error, SqliteCampusStore, SqliteScoreLedger};

async fn campus() -> SqliteCampusStore {
  SqliteCampusStore::open_in_memory()
    .await
    .expect("in-memory campus store")
}

async fn ledger() -> SqliteScoreLedger {
  SqliteScoreLedger::open_in_memory()
    .await
    .expect("in-memory score ledger")
}

fn question(author_id: Option<i64>) -> NewQuestion {
  NewQuestion::new(author_id, "Where is room 204?", Some("I am lost".into()))
    .unwrap()
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_user_is_idempotent() {
  let s = campus().await;

  s.register_user(7, Some("alice".into())).await.unwrap();
  s.register_user(7, Some("impostor".into())).await.unwrap();

  let user = s.get_user(7).await.unwrap().unwrap();
  assert_eq!(user.username.as_deref(), Some("alice"));
  assert!(!user.is_representative);
}

#[tokio::test]
async fn reregistration_keeps_representative_flag() {
  let s = campus().await;

  s.register_user(7, Some("alice".into())).await.unwrap();
  assert!(s.set_representative(7, true).await.unwrap());
  s.register_user(7, Some("alice".into())).await.unwrap();

  assert!(s.is_representative(7).await.unwrap());
}

#[tokio::test]
async fn set_representative_reports_missing_user() {
  let s = campus().await;
  assert!(!s.set_representative(999, true).await.unwrap());
}

#[tokio::test]
async fn is_representative_false_for_unknown_user() {
  let s = campus().await;
  assert!(!s.is_representative(999).await.unwrap());
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = campus().await;
  assert!(s.get_user(42).await.unwrap().is_none());
}

// ─── Questions ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_question() {
  let s = campus().await;
  s.register_user(1, Some("bob".into())).await.unwrap();

  let id = s.create_question(question(Some(1))).await.unwrap();
  let view = s.get_question(id).await.unwrap().unwrap();

  assert_eq!(view.id, id);
  assert_eq!(view.title, "Where is room 204?");
  assert_eq!(view.status, QuestionStatus::Open);
  assert_eq!(view.author, "bob");
}

#[tokio::test]
async fn get_question_missing_returns_none() {
  let s = campus().await;
  assert!(s.get_question(12345).await.unwrap().is_none());
}

#[tokio::test]
async fn null_author_renders_anonymous() {
  let s = campus().await;
  let id = s.create_question(question(None)).await.unwrap();
  let view = s.get_question(id).await.unwrap().unwrap();
  assert_eq!(view.author, ANONYMOUS);
}

#[tokio::test]
async fn dangling_author_renders_anonymous() {
  let s = campus().await;
  // Author id referencing no user row at all.
  let id = s.create_question(question(Some(555))).await.unwrap();
  let view = s.get_question(id).await.unwrap().unwrap();
  assert_eq!(view.author, ANONYMOUS);
}

#[tokio::test]
async fn list_open_excludes_closed_questions() {
  let s = campus().await;
  s.register_user(2, Some("rep".into())).await.unwrap();

  let q1 = s.create_question(question(None)).await.unwrap();
  let q2 = s.create_question(question(None)).await.unwrap();

  s.save_answer(NewAnswer::online(q1, 2, "@rep")).await.unwrap();

  let open = s.list_open().await.unwrap();
  assert_eq!(open.len(), 1);
  assert_eq!(open[0].id, q2);
}

// ─── Answers ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_answer_closes_question() {
  let s = campus().await;
  let q = s.create_question(question(None)).await.unwrap();

  let answer = s.save_answer(NewAnswer::online(q, 2, "@rep")).await.unwrap();
  assert_eq!(answer.question_id, q);
  assert_eq!(answer.payload, AnswerPayload::Online { contact: "@rep".into() });

  let view = s.get_question(q).await.unwrap().unwrap();
  assert_eq!(view.status, QuestionStatus::Closed);
}

#[tokio::test]
async fn offline_answer_carries_meeting_time() {
  let s = campus().await;
  let q = s.create_question(question(None)).await.unwrap();

  s.save_answer(NewAnswer::offline(q, 2, "Tue 14:00, library"))
    .await
    .unwrap();

  let answers = s.answers_for(q).await.unwrap();
  assert_eq!(answers.len(), 1);
  assert_eq!(
    answers[0].payload,
    AnswerPayload::Offline { meeting_time: "Tue 14:00, library".into() }
  );
}

#[tokio::test]
async fn save_answer_unknown_question_errors() {
  let s = campus().await;
  let err = s
    .save_answer(NewAnswer::online(9000, 2, "@rep"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::QuestionNotFound(9000)));
}

#[tokio::test]
async fn reject_last_answer_reopens_question() {
  let s = campus().await;
  let q = s.create_question(question(None)).await.unwrap();
  let answer = s.save_answer(NewAnswer::online(q, 2, "@rep")).await.unwrap();

  let outcome = s.reject_answer(answer.id).await.unwrap();
  assert_eq!(outcome.question_id, q);
  assert_eq!(outcome.remaining, 0);
  assert!(outcome.reopened);

  let view = s.get_question(q).await.unwrap().unwrap();
  assert_eq!(view.status, QuestionStatus::Open);
}

#[tokio::test]
async fn reject_with_remaining_answers_keeps_question_closed() {
  let s = campus().await;
  let q = s.create_question(question(None)).await.unwrap();
  let first = s.save_answer(NewAnswer::online(q, 2, "@rep")).await.unwrap();
  s.save_answer(NewAnswer::offline(q, 3, "Wed 10:00")).await.unwrap();

  let outcome = s.reject_answer(first.id).await.unwrap();
  assert_eq!(outcome.remaining, 1);
  assert!(!outcome.reopened);

  let view = s.get_question(q).await.unwrap().unwrap();
  assert_eq!(view.status, QuestionStatus::Closed);
}

#[tokio::test]
async fn reject_unknown_answer_errors() {
  let s = campus().await;
  let err = s.reject_answer(404).await.unwrap_err();
  assert!(matches!(err, Error::AnswerNotFound(404)));
}

#[tokio::test]
async fn closure_tracks_answer_count_through_any_sequence() {
  let s = campus().await;
  let q = s.create_question(question(None)).await.unwrap();

  let a1 = s.save_answer(NewAnswer::online(q, 2, "@rep")).await.unwrap();
  let a2 = s.save_answer(NewAnswer::offline(q, 3, "Thu 9:00")).await.unwrap();

  // closed while any answer remains, open once the last one goes
  s.reject_answer(a1.id).await.unwrap();
  let view = s.get_question(q).await.unwrap().unwrap();
  assert_eq!(view.status, QuestionStatus::Closed);

  s.reject_answer(a2.id).await.unwrap();
  let view = s.get_question(q).await.unwrap().unwrap();
  assert_eq!(view.status, QuestionStatus::Open);

  let a3 = s.save_answer(NewAnswer::online(q, 2, "@rep2")).await.unwrap();
  let view = s.get_question(q).await.unwrap().unwrap();
  assert_eq!(view.status, QuestionStatus::Closed);
  assert_eq!(s.answers_for(q).await.unwrap().len(), 1);
  assert_eq!(a3.question_id, q);
}

// ─── Battles ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_battle_starts_unaccepted() {
  let s = campus().await;
  let battle = s
    .open_battle(NewBattle {
      initiator_id: 2,
      receiver_id:  3,
      points:       25,
      comment:      Some("chess rematch".into()),
    })
    .await
    .unwrap();

  assert!(!battle.is_accepted);
  assert!(battle.winner.is_none());
  assert!(battle.over_at.is_none());
}

// ─── Score ledger ────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_score_creates_row_lazily() {
  let l = ledger().await;
  assert_eq!(l.add_score("10A", 50).await.unwrap(), 50);
}

#[tokio::test]
async fn add_score_accumulates() {
  let l = ledger().await;
  l.add_score("10A", 10).await.unwrap();
  l.add_score("10A", 20).await.unwrap();
  assert_eq!(l.add_score("10A", -5).await.unwrap(), 25);
}

#[tokio::test]
async fn concurrent_increments_do_not_lose_updates() {
  let l = ledger().await;

  let mut tasks = Vec::new();
  for _ in 0..8 {
    let l = l.clone();
    tasks.push(tokio::spawn(async move {
      for _ in 0..25 {
        l.add_score("10A", 1).await.unwrap();
      }
    }));
  }
  for task in tasks {
    task.await.unwrap();
  }

  let ranking = l.ranking().await.unwrap();
  assert_eq!(ranking.len(), 1);
  assert_eq!(ranking[0].total_score, 200);
}

#[tokio::test]
async fn ranking_sorts_by_score_then_name() {
  let l = ledger().await;
  l.add_score("A", 10).await.unwrap();
  l.add_score("C", 30).await.unwrap();
  l.add_score("B", 30).await.unwrap();

  let ranking = l.ranking().await.unwrap();
  let names: Vec<&str> = ranking.iter().map(|c| c.class_name.as_str()).collect();
  assert_eq!(names, ["B", "C", "A"]);
}

#[tokio::test]
async fn health_reports_row_count() {
  let l = ledger().await;
  assert_eq!(l.health().await.unwrap().class_count, 0);

  l.add_score("10A", 1).await.unwrap();
  l.add_score("9B", 1).await.unwrap();
  l.add_score("10A", 1).await.unwrap();

  assert_eq!(l.health().await.unwrap().class_count, 2);
}
