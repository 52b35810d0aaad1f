//! Application state management

use crate::config::AppConfig;
use crate::db::sqlite::SqliteDb;
use crate::error::Result;
use crate::market_data::{Fetcher, HttpFetcher};
use crate::services::PriceService;
use std::sync::Arc;

/// Application state shared by the ingestion pipeline and the console
pub struct AppState {
    /// Pooled SQLite store
    pub db: Arc<SqliteDb>,

    /// Price lookups against the market data provider
    pub prices: PriceService,

    pub config: AppConfig,
}

impl AppState {
    /// Create application state talking to the real provider over HTTP
    pub fn new(config: AppConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new()?);
        Self::with_fetcher(config, fetcher)
    }

    /// Create application state with a custom market data source
    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;

        tracing::info!("Database file: {:?}", config.database_path);
        let db = Arc::new(SqliteDb::open(&config.database_path, config.pool_size)?);
        let prices = PriceService::new(fetcher, config.quote_base_url.clone());

        Ok(Self { db, prices, config })
    }
}
