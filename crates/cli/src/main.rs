mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pokexp_core::constants::{CONFIG_PATH_ENV, DATABASE_URL_ENV, DB_PATH_ENV};
use pokexp_core::{env_non_empty, ProgressionConfig};
use pokexp_service::{ProgressService, TracingNotifier};
use pokexp_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pokexp")]
#[command(about = "Progression engine for PokeExp trainers", long_about = None)]
struct Cli {
    /// Keep progress in memory only (nothing is persisted)
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a trainer's progress
    Show { user: String },
    /// Apply an award event (POKEMON_CAPTURE, DAILY_CHALLENGE_COMPLETE, FIRST_DISCOVERY_POST, ...)
    Award {
        user: String,
        event: String,
        #[arg(short, long)]
        pokemon_id: Option<u32>,
        /// Date of the event, defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Assign today's daily challenge
    Challenge {
        user: String,
        #[arg(short = 't', long = "type")]
        pokemon_type: String,
        #[arg(long, default_value = "1")]
        target: u32,
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Delete a trainer's progress
    Reset { user: String },
    /// Print the level table
    Levels,
    /// Print badge definitions
    Badges,
}

pub(crate) fn get_db_path() -> PathBuf {
    env_non_empty(DB_PATH_ENV).map_or_else(
        || {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pokexp")
                .join("progress.db")
        },
        PathBuf::from,
    )
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn load_config() -> Result<ProgressionConfig> {
    match env_non_empty(CONFIG_PATH_ENV) {
        Some(path) => Ok(ProgressionConfig::load(Path::new(&path))?),
        None => Ok(ProgressionConfig::default()),
    }
}

async fn open_storage(memory: bool) -> Result<StorageBackend> {
    if memory {
        return Ok(StorageBackend::new_memory());
    }
    if let Some(url) = env_non_empty(DATABASE_URL_ENV) {
        #[cfg(feature = "postgres")]
        {
            return Ok(StorageBackend::new_postgres(&url).await?);
        }
        #[cfg(not(feature = "postgres"))]
        {
            let _ = url;
            anyhow::bail!("{DATABASE_URL_ENV} is set but pokexp was built without the postgres feature");
        }
    }
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    Ok(StorageBackend::new_sqlite(&db_path)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Arc::new(load_config()?);

    match cli.command {
        Commands::Levels => commands::config::run_levels(&config),
        Commands::Badges => commands::config::run_badges(&config),
        command => {
            let storage = Arc::new(open_storage(cli.memory).await?);
            tracing::debug!(backend = storage.kind(), "storage ready");
            let service = ProgressService::new(storage, config, Arc::new(TracingNotifier));
            match command {
                Commands::Show { user } => commands::progress::run_show(&service, &user).await,
                Commands::Award { user, event, pokemon_id, date } => {
                    commands::progress::run_award(&service, &user, &event, pokemon_id, date).await
                },
                Commands::Challenge { user, pokemon_type, target, date } => {
                    commands::progress::run_challenge(&service, &user, &pokemon_type, target, date)
                        .await
                },
                Commands::Reset { user } => commands::progress::run_reset(&service, &user).await,
                Commands::Levels | Commands::Badges => Ok(()),
            }
        },
    }
}
