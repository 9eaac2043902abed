//! User — a platform account known to the bot.
//!
//! Users are created on first contact and never deleted. The only mutable
//! attribute the core logic cares about is the representative flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user row.
///
/// `points` is a per-user counter carried in the schema for the wager
/// feature; none of the question/answer/score paths read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Platform-assigned id; primary key, never generated by us.
  pub user_id:           i64,
  pub username:          Option<String>,
  pub points:            i64,
  pub registered_at:     DateTime<Utc>,
  /// Whether this user may answer questions and open wagers.
  pub is_representative: bool,
}

/// Display name placeholder for a missing or anonymous author.
pub const ANONYMOUS: &str = "Anonymous";
