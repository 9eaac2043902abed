//! classdesk-admin — operator CLI for the classdesk stores.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens both
//! SQLite stores, and runs one admin operation: score addition, ranking,
//! representative management, open-question listing, health check, or CSV
//! export of the leaderboard.

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use classdesk_core::time::display_minute;
use classdesk_service::{DeskService, export};
use classdesk_store_sqlite::{SqliteCampusStore, SqliteScoreLedger};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use config::AppConfig;

#[derive(Parser)]
#[command(author, version, about = "classdesk operator CLI")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Act as this admin id instead of the first configured one.
  #[arg(long)]
  as_admin: Option<i64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the class leaderboard, best first.
  Ranking,
  /// Add points to a class; input format `<class> <points>`, e.g. "10A 50".
  AddScore { input: String },
  /// Grant (or, with --revoke, remove) the representative flag.
  SetRepresentative {
    user_id: i64,
    #[arg(long)]
    revoke:  bool,
  },
  /// List open questions.
  OpenQuestions,
  /// Report score-store health.
  CheckDb,
  /// Export the leaderboard as CSV.
  Export {
    #[arg(short, long, default_value = "classes.csv")]
    out: PathBuf,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::builder(&cli.config).context("failed to read config")?;
  let app_cfg: AppConfig = settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")?;

  // Store open failure is fatal; there is no retry policy — the operator
  // fixes the environment and reruns.
  let campus = SqliteCampusStore::open(&app_cfg.users_db_path)
    .await
    .with_context(|| format!("failed to open users store at {:?}", app_cfg.users_db_path))?;
  let ledger = SqliteScoreLedger::open(&app_cfg.classes_db_path)
    .await
    .with_context(|| {
      format!("failed to open classes store at {:?}", app_cfg.classes_db_path)
    })?;

  let admin_id = cli
    .as_admin
    .or_else(|| app_cfg.admin_ids.first().copied())
    .context("no admin id configured; set admin_ids or pass --as-admin")?;

  let desk = DeskService::new(Arc::new(campus), Arc::new(ledger), app_cfg.admin_ids);

  match cli.command {
    Command::Ranking => {
      for (place, class) in desk.ranking().await?.iter().enumerate() {
        println!("{:>3}. {:<12} {}", place + 1, class.class_name, class.total_score);
      }
    }

    Command::AddScore { input } => {
      let (delta, total) = desk.add_score_text(admin_id, &input).await?;
      println!("{}: {:+} -> {}", delta.class_name, delta.score, total);
    }

    Command::SetRepresentative { user_id, revoke } => {
      desk.set_representative(admin_id, user_id, !revoke).await?;
      println!(
        "user {user_id} is {} a representative",
        if revoke { "no longer" } else { "now" }
      );
    }

    Command::OpenQuestions => {
      let open = desk.open_questions().await?;
      if open.is_empty() {
        println!("no open questions");
      }
      for q in open {
        let detail = desk.question(q.id).await?;
        match detail {
          Some(view) => println!(
            "#{} [{}] {} — {}",
            q.id,
            display_minute(view.created_at),
            q.title,
            view.author
          ),
          None => println!("#{} {}", q.id, q.title),
        }
      }
    }

    Command::CheckDb => {
      let health = desk.ledger_health().await?;
      println!(
        "classes store OK at {:?}: {} class(es)",
        app_cfg.classes_db_path, health.class_count
      );
    }

    Command::Export { out } => {
      let (columns, rows) = desk.ranking_export().await?;
      let csv = export::to_csv(&columns, &rows);
      std::fs::write(&out, csv)
        .with_context(|| format!("failed to write {out:?}"))?;
      tracing::info!(path = ?out, "leaderboard exported");
      println!("{}", out.display());
    }
  }

  Ok(())
}
