//! Price Service
//!
//! Answers "closing price for ticker X on day D" for today and yesterday.
//! Nothing is cached; every call goes to the provider.

use crate::error::Result;
use crate::market_data::{quote_url, Fetcher, QuoteRow, Window};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// Price lookups composed from a fetcher and the quote parser
pub struct PriceService {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
}

impl PriceService {
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// Closing price reported for `symbol` within `window`
    pub async fn get_price(&self, symbol: &str, window: Window) -> Result<f64> {
        let url = quote_url(&self.base_url, symbol, window)?;
        let body = self.fetcher.fetch(&url).await?;
        let row = QuoteRow::from_csv(&body)?;

        debug!(
            "PriceService::get_price - {} [{}, {}) close {} ({})",
            symbol, window.start, window.end, row.close, row.date
        );
        Ok(row.close)
    }

    /// Price over `[yesterday 00:00, today 00:00)`
    pub async fn get_today_price(&self, symbol: &str, today: NaiveDate) -> Result<f64> {
        self.get_price(symbol, Window::today(today)?).await
    }

    /// Price over `[two days ago 00:00, yesterday 00:00)`
    pub async fn get_yesterday_price(&self, symbol: &str, today: NaiveDate) -> Result<f64> {
        self.get_price(symbol, Window::yesterday(today)?).await
    }
}
