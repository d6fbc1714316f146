//! `dealership` command-line entry point.
//!
//! # Responsibility
//! - Read configuration from flags and `DEALERSHIP_*` environment variables.
//! - Open one store session per invocation and release it on exit.
//! - Print JSON responses on stdout and tagged failures on stderr.

mod routes;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dealership_core::db::{open_db, open_db_in_memory};
use dealership_core::{default_log_level, init_logging, LogTarget, SqliteStore};
use routes::Failure;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "dealership", version, about = "Dealer, car, customer and sale records")]
struct Cli {
    /// SQLite database file, created on first use.
    #[arg(long, env = "DEALERSHIP_DB", default_value = "car_sales.db")]
    db: PathBuf,

    /// Use a throwaway in-memory store instead of `--db`.
    #[arg(long)]
    in_memory: bool,

    /// trace|debug|info|warn|error
    #[arg(long, env = "DEALERSHIP_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when absent.
    #[arg(long, env = "DEALERSHIP_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    resource: Resource,
}

#[derive(Debug, Subcommand)]
pub enum Resource {
    Dealers {
        #[command(subcommand)]
        action: Action,
    },
    Cars {
        #[command(subcommand)]
        action: Action,
    },
    Customers {
        #[command(subcommand)]
        action: Action,
    },
    Sales {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Create a record from a JSON payload (`--json` or stdin).
    Create {
        #[arg(long)]
        json: Option<String>,
    },
    /// List records in list shape, ordered by id.
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one record in detail shape.
    Get { id: i64 },
    /// Replace every base field of a record from a JSON payload.
    Update {
        id: i64,
        #[arg(long)]
        json: Option<String>,
    },
    /// Delete a record and print its prior state.
    Delete { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(body) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let failure = Failure::from_error(&err);
            eprintln!("{}", failure.body());
            ExitCode::from(failure.exit_code())
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    let target = cli.log_dir.map_or(LogTarget::Stderr, LogTarget::Directory);
    init_logging(&level, target).map_err(anyhow::Error::msg)?;

    let conn = if cli.in_memory {
        open_db_in_memory().context("failed to open in-memory store")?
    } else {
        open_db(&cli.db).with_context(|| format!("failed to open `{}`", cli.db.display()))?
    };
    let store = SqliteStore::try_new(&conn)?;

    let response = routes::dispatch(store, cli.resource)?;
    Ok(serde_json::to_string_pretty(&response)?)
}
