//! Stock Condition CLI.
//!
//! Commands:
//! - `run` (default) - ingest the ticker file, then open the lookup console;
//!   an unreadable ticker file skips ingestion but still opens the console
//! - `ingest` - ingest the ticker file only; an unreadable ticker file fails
//! - `console` - open the lookup console against an existing database

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stock_condition::config::{self, AppConfig, WritePolicy};
use stock_condition::services::{ConsoleService, IngestReport, IngestionService, SessionService};
use stock_condition::state::AppState;

#[derive(Parser)]
#[command(
    name = "stock-condition",
    about = "Daily stock price ingestion and condition lookup"
)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Options {
    /// SQLite database file.
    #[arg(long, global = true, default_value = config::DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Line-delimited ticker symbol file.
    #[arg(long, global = true, default_value = config::DEFAULT_TICKERS_PATH)]
    tickers: PathBuf,

    /// Base URL of the daily history download endpoint.
    #[arg(long, global = true, default_value = config::DEFAULT_QUOTE_BASE_URL)]
    quote_url: String,

    /// Maximum tickers ingested at the same time (1 = strictly sequential).
    #[arg(long, global = true, default_value_t = config::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// How repeated runs treat existing rows: append or upsert.
    #[arg(long, global = true, default_value = "append")]
    write_policy: WritePolicy,

    /// Maximum pooled database connections.
    #[arg(long, global = true, default_value_t = config::DEFAULT_POOL_SIZE)]
    pool_size: u32,

    /// Debug-level logging (RUST_LOG overrides).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
}

impl Options {
    fn into_config(self) -> AppConfig {
        AppConfig {
            database_path: self.database,
            tickers_path: self.tickers,
            quote_base_url: self.quote_url,
            concurrency: self.concurrency,
            write_policy: self.write_policy,
            pool_size: self.pool_size,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the ticker file, then open the lookup console.
    Run,
    /// Ingest the ticker file and exit.
    Ingest {
        /// Print the run report as JSON on stdout.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Look up stored conditions interactively.
    Console,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    stock_condition::init_tracing(cli.options.verbose);

    let config = cli.options.into_config();
    let state = AppState::new(config).context("failed to initialize application state")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            SessionService::run(&state, stdin.lock(), stdout.lock())
                .await
                .context("console I/O failed")?;
        }
        Commands::Ingest { json } => {
            let report = ingest(&state).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{}: {} recorded, {} without condition, {} skipped",
                    report.date, report.recorded, report.condition_failed, report.skipped
                );
            }
        }
        Commands::Console => console(&state)?,
    }

    Ok(())
}

async fn ingest(state: &AppState) -> Result<IngestReport> {
    tracing::info!("Starting ingestion from {:?}", state.config.tickers_path);

    IngestionService::run_from_file(state)
        .await
        .with_context(|| format!("failed to read ticker file {:?}", state.config.tickers_path))
}

fn console(state: &AppState) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ConsoleService::run(state, stdin.lock(), stdout.lock()).context("console I/O failed")
}
