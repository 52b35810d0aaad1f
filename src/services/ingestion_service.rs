//! Ingestion Service
//!
//! Drives one ingestion run over a list of ticker symbols:
//!
//! ```text
//! today price --> ticker + price rows --> yesterday price --> condition row
//! ```
//!
//! A failure for one ticker never stops the run. Today-price failures skip
//! the ticker entirely; condition failures leave the ticker and price rows
//! in place without a condition.

use crate::error::{AppError, ErrorKind, Result};
use crate::services::console_service::normalize_symbol;
use crate::services::ConditionService;
use crate::state::AppState;
use chrono::{Local, NaiveDate};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// What happened to one ticker during a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickerOutcome {
    /// Price and condition stored
    Recorded {
        ticker_id: i64,
        today_price: f64,
        delta: f64,
    },
    /// Price stored, condition not
    ConditionFailed {
        ticker_id: i64,
        today_price: f64,
        kind: ErrorKind,
        message: String,
    },
    /// Nothing stored
    Skipped { kind: ErrorKind, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct TickerReport {
    pub symbol: String,
    #[serde(flatten)]
    pub outcome: TickerOutcome,
}

/// Result of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub date: String,
    pub recorded: usize,
    pub condition_failed: usize,
    pub skipped: usize,
    pub tickers: Vec<TickerReport>,
}

impl IngestReport {
    fn new(today: NaiveDate, tickers: Vec<TickerReport>) -> Self {
        let mut recorded = 0;
        let mut condition_failed = 0;
        let mut skipped = 0;
        for report in &tickers {
            match report.outcome {
                TickerOutcome::Recorded { .. } => recorded += 1,
                TickerOutcome::ConditionFailed { .. } => condition_failed += 1,
                TickerOutcome::Skipped { .. } => skipped += 1,
            }
        }

        Self {
            date: format_date(today),
            recorded,
            condition_failed,
            skipped,
            tickers,
        }
    }

    pub fn outcome(&self, symbol: &str) -> Option<&TickerOutcome> {
        self.tickers
            .iter()
            .find(|r| r.symbol == symbol)
            .map(|r| &r.outcome)
    }
}

fn format_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Read a line-delimited ticker list, ignoring blank lines and `#` comments.
///
/// Symbols are upper-cased so console lookups match them.
pub fn load_symbols(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;

    let symbols: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(normalize_symbol)
        .collect();

    info!("Loaded {} ticker symbols from {:?}", symbols.len(), path);
    Ok(symbols)
}

pub struct IngestionService;

impl IngestionService {
    /// Ingest the configured ticker file for the current local date.
    ///
    /// An unreadable ticker file aborts the run before any ticker is fetched.
    pub async fn run_from_file(state: &AppState) -> Result<IngestReport> {
        let symbols = load_symbols(&state.config.tickers_path)?;
        Ok(Self::run(state, &symbols).await)
    }

    /// Ingest `symbols` for the current local date
    pub async fn run(state: &AppState, symbols: &[String]) -> IngestReport {
        Self::run_for_date(state, symbols, Local::now().date_naive()).await
    }

    /// Ingest `symbols` treating `today` as the current date.
    ///
    /// At most `config.concurrency` tickers are in flight at once; reports come
    /// back in input order.
    pub async fn run_for_date(state: &AppState, symbols: &[String], today: NaiveDate) -> IngestReport {
        info!(
            "IngestionService::run - {} symbols for {} (concurrency {}, policy {:?})",
            symbols.len(),
            today,
            state.config.concurrency,
            state.config.write_policy
        );

        let tickers: Vec<TickerReport> = stream::iter(symbols.iter().cloned())
            .map(move |symbol| async move {
                let outcome = Self::ingest_ticker(state, &symbol, today).await;
                TickerReport { symbol, outcome }
            })
            .buffered(state.config.concurrency.max(1))
            .collect()
            .await;

        let report = IngestReport::new(today, tickers);
        info!(
            "Ingestion finished: {} recorded, {} without condition, {} skipped",
            report.recorded, report.condition_failed, report.skipped
        );
        report
    }

    async fn ingest_ticker(state: &AppState, symbol: &str, today: NaiveDate) -> TickerOutcome {
        let today_price = match state.prices.get_today_price(symbol, today).await {
            Ok(price) => price,
            Err(e) => {
                warn!(code = e.code(), "Error fetching price for {}: {}", symbol, e);
                return skipped(&e);
            }
        };

        let (ticker, _) = match state.db.record_price(
            symbol,
            today_price,
            &format_date(today),
            state.config.write_policy,
        ) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(code = e.code(), "Error storing price for {}: {}", symbol, e);
                return skipped(&e);
            }
        };

        info!("Stored {} (ticker {}) at {}", symbol, ticker.id, today_price);

        match ConditionService::analyze(state, ticker.id, symbol, today_price, today).await {
            Ok(condition) => TickerOutcome::Recorded {
                ticker_id: ticker.id,
                today_price,
                delta: condition.delta,
            },
            Err(e) => {
                warn!(code = e.code(), "Condition for {} not recorded: {}", symbol, e);
                TickerOutcome::ConditionFailed {
                    ticker_id: ticker.id,
                    today_price,
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        }
    }
}

fn skipped(err: &AppError) -> TickerOutcome {
    TickerOutcome::Skipped {
        kind: err.kind(),
        message: err.to_string(),
    }
}
