//! Command-line interface.
//!
//! `serve` is the default. `migrate` and `seed` run with a database pool
//! only, without starting the HTTP server.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing::info;

use crate::db;
use crate::models::{Advocate, NewAdvocate};

/// Sample records bundled with the binary.
const BUNDLED_SEED: &str = include_str!("../seed/advocates.json");

/// Advocate directory server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server.
    Serve,

    /// Apply pending database migrations and exit.
    Migrate,

    /// Insert sample advocates.
    Seed {
        /// JSON file with an array of advocates (camelCase fields).
        /// Defaults to the bundled sample set.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Empty the table before inserting.
        #[arg(long)]
        truncate: bool,
    },
}

impl Cli {
    /// Subcommand to run, defaulting to `serve`.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

/// Apply migrations.
pub async fn cmd_migrate(pool: &PgPool) -> Result<()> {
    db::run_migrations(pool).await?;
    info!("Migrations applied");
    Ok(())
}

/// Parse seed records from a file, or the bundled set when `file` is `None`.
pub fn load_seed(file: Option<&Path>) -> Result<Vec<NewAdvocate>> {
    let json = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?,
        None => BUNDLED_SEED.to_string(),
    };

    serde_json::from_str(&json).context("seed file must be a JSON array of advocates")
}

/// Insert seed records. Returns the number inserted.
pub async fn cmd_seed(pool: &PgPool, file: Option<&Path>, truncate: bool) -> Result<usize> {
    let records = load_seed(file)?;

    if truncate {
        sqlx::query("TRUNCATE advocates RESTART IDENTITY")
            .execute(pool)
            .await
            .context("failed to truncate advocates")?;
        info!("Advocates table truncated");
    }

    for record in &records {
        record.insert(pool).await?;
    }

    let total = Advocate::count_all(pool).await?;
    info!(inserted = records.len(), total, "Seed complete");

    Ok(records.len())
}
