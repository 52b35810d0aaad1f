//! Stock Condition - daily price ingestion and condition lookup
//!
//! Fetches daily closing prices for a list of ticker symbols, stores them in
//! SQLite, records the day-over-day price delta ("condition") per ticker, and
//! answers interactive lookups of the latest condition.

pub mod config;
pub mod db;
pub mod error;
pub mod market_data;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging on stderr
///
/// `RUST_LOG` takes precedence over the built-in default filter.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "stock_condition=debug"
    } else {
        "stock_condition=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
