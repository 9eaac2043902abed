//! [`SqliteScoreLedger`] — the SQLite implementation of [`ScoreLedger`].

use std::path::Path;

use classdesk_core::{
  score::{ClassScore, LedgerHealth},
  store::ScoreLedger,
};

use crate::{Result, schema::CLASSES_SCHEMA};

/// The class leaderboard, backed by its own SQLite file so it can be reset
/// without touching user history.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteScoreLedger {
  conn: tokio_rusqlite::Connection,
}

impl SqliteScoreLedger {
  /// Open (or create) a ledger at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let ledger = Self { conn };
    ledger.init_schema().await?;
    Ok(ledger)
  }

  /// Open an in-memory ledger — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let ledger = Self { conn };
    ledger.init_schema().await?;
    Ok(ledger)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(CLASSES_SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl ScoreLedger for SqliteScoreLedger {
  type Error = crate::Error;

  async fn add_score(&self, class_name: &str, delta: i64) -> Result<i64> {
    let class_name = class_name.to_owned();

    // A single upsert statement, not read-then-write: two concurrent
    // increments for the same class must both land.
    let total = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO class_scores (class_name, total_score) VALUES (?1, ?2)
           ON CONFLICT(class_name)
           DO UPDATE SET total_score = total_score + excluded.total_score",
          rusqlite::params![class_name, delta],
        )?;

        let total: i64 = conn.query_row(
          "SELECT total_score FROM class_scores WHERE class_name = ?1",
          rusqlite::params![class_name],
          |row| row.get(0),
        )?;
        Ok(total)
      })
      .await?;
    Ok(total)
  }

  async fn ranking(&self) -> Result<Vec<ClassScore>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT class_name, total_score FROM class_scores
           ORDER BY total_score DESC, class_name ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(ClassScore { class_name: row.get(0)?, total_score: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn health(&self) -> Result<LedgerHealth> {
    let class_count: u64 = self
      .conn
      .call(|conn| {
        let n = conn.query_row("SELECT COUNT(*) FROM class_scores", [], |row| {
          row.get(0)
        })?;
        Ok(n)
      })
      .await?;
    Ok(LedgerHealth { class_count })
  }
}
