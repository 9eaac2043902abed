//! SQLite backend for the classdesk stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread per connection without blocking the async runtime. Two
//! independent database files are involved: the users store
//! (users/questions/answers/battles) and the classes store (the score
//! ledger), so the leaderboard can be rotated without losing user history.

mod encode;
mod schema;
mod scores;
mod users;

pub mod error;

pub use error::{Error, Result};
pub use scores::SqliteScoreLedger;
pub use users::SqliteCampusStore;

#[cfg(test)]
mod tests;
