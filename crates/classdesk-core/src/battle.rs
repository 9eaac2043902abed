//! Battle — a representative-vs-representative point wager.
//!
//! The schema and the gated insert path exist; the acceptance/settlement
//! workflow never shipped and no read path is exposed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted wager row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battle {
  pub id:           i64,
  pub initiator_id: i64,
  pub receiver_id:  i64,
  /// Points wagered by the initiator.
  pub points:       i64,
  pub is_accepted:  bool,
  pub comment:      Option<String>,
  /// Winning user id once settled; never populated by current code.
  pub winner:       Option<i64>,
  pub created_at:   DateTime<Utc>,
  pub over_at:      Option<DateTime<Utc>>,
}

/// Input for opening a wager.
#[derive(Debug, Clone)]
pub struct NewBattle {
  pub initiator_id: i64,
  pub receiver_id:  i64,
  pub points:       i64,
  pub comment:      Option<String>,
}
