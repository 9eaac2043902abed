//! Runtime configuration, deserialised from `config.toml` and the
//! `CLASSDESK_*` environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Layered settings: optional TOML file, then `CLASSDESK_*` environment
/// variables on top.
pub fn builder(path: &Path) -> Result<config::Config, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("CLASSDESK"))
    .build()
}

#[derive(Deserialize, Clone)]
pub struct AppConfig {
  /// Path of the users store (users, questions, answers, battles).
  pub users_db_path:   PathBuf,
  /// Path of the classes store (the score ledger). Independent of the
  /// users store so the leaderboard can be reset on its own.
  pub classes_db_path: PathBuf,
  /// Platform ids allowed to run admin actions.
  #[serde(default)]
  pub admin_ids:       Vec<i64>,
}
