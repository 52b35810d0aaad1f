//! SQLite database module

pub mod models;
mod conditions;
mod connection;
mod migrations;
mod prices;
mod tickers;

use crate::config::WritePolicy;
use crate::error::Result;
use connection::SqlitePool;
pub use models::{ConditionRecord, PriceRecord, Ticker};
use std::path::Path;

/// SQLite database wrapper.
///
/// Every operation checks a connection out of the pool for its own
/// duration; writes that belong together run in one transaction.
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    /// Open (or create) the database file and bring the schema up to date
    pub fn open(path: &Path, pool_size: u32) -> Result<Self> {
        let pool = connection::create_pool(path, pool_size)?;
        let db = Self { pool };

        db.run_migrations()?;
        tracing::info!("Database ready at {:?}", path);

        Ok(db)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.pool.get()?;
        migrations::run_migrations(&conn)
    }

    // ========== Ingestion Methods ==========

    /// Persist the ticker row and today's price as one unit of work
    pub fn record_price(
        &self,
        symbol: &str,
        price: f64,
        date: &str,
        policy: WritePolicy,
    ) -> Result<(Ticker, PriceRecord)> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let (ticker, record) = match policy {
            WritePolicy::Append => {
                let ticker = tickers::insert_ticker(&tx, symbol)?;
                let record = prices::insert_price(&tx, ticker.id, price, date)?;
                (ticker, record)
            }
            WritePolicy::Upsert => {
                let ticker = tickers::find_or_insert_ticker(&tx, symbol)?;
                let record = prices::upsert_price(&tx, ticker.id, price, date)?;
                // The old condition describes an earlier price
                conditions::clear_conditions(&tx, ticker.id)?;
                (ticker, record)
            }
        };

        tx.commit()?;
        Ok((ticker, record))
    }

    /// Persist the condition for a ticker
    pub fn record_condition(
        &self,
        ticker_id: i64,
        delta: f64,
        policy: WritePolicy,
    ) -> Result<ConditionRecord> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let record = match policy {
            WritePolicy::Append => conditions::insert_condition(&tx, ticker_id, delta)?,
            WritePolicy::Upsert => conditions::replace_condition(&tx, ticker_id, delta)?,
        };

        tx.commit()?;
        Ok(record)
    }

    // ========== Lookup Methods ==========

    /// Resolve a symbol (exact match) to its latest ticker id
    pub fn find_ticker_id(&self, symbol: &str) -> Result<Option<i64>> {
        let conn = self.pool.get()?;
        tickers::find_ticker_id(&conn, symbol)
    }

    /// Latest condition recorded for a ticker id
    pub fn latest_condition(&self, ticker_id: i64) -> Result<Option<f64>> {
        let conn = self.pool.get()?;
        conditions::latest_condition(&conn, ticker_id)
    }

    pub fn count_tickers(&self, symbol: &str) -> Result<i64> {
        let conn = self.pool.get()?;
        tickers::count_tickers(&conn, symbol)
    }

    pub fn prices_for_symbol(&self, symbol: &str) -> Result<Vec<PriceRecord>> {
        let conn = self.pool.get()?;
        prices::prices_for_symbol(&conn, symbol)
    }

    pub fn conditions_for_symbol(&self, symbol: &str) -> Result<Vec<ConditionRecord>> {
        let conn = self.pool.get()?;
        conditions::conditions_for_symbol(&conn, symbol)
    }
}
