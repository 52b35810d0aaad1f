//! Canned market data for unit tests

use crate::error::{AppError, Result};
use crate::market_data::{Fetcher, Window};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use url::Url;

pub const BASE_URL: &str = "https://quotes.test/v7/finance/download";

enum Reply {
    Body(String),
    Status(u16),
}

/// Fetcher answering from a table keyed by symbol and window end
#[derive(Default)]
pub struct StubFetcher {
    replies: Mutex<HashMap<(String, i64), Reply>>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer with a one-row quote whose close is `close`
    pub fn price(&self, symbol: &str, window: Window, close: f64) -> &Self {
        self.body(symbol, window, &format!("Date,Close\n2024-01-01,{}\n", close))
    }

    pub fn body(&self, symbol: &str, window: Window, body: &str) -> &Self {
        self.replies
            .lock()
            .insert((symbol.to_string(), window.end), Reply::Body(body.to_string()));
        self
    }

    pub fn status(&self, symbol: &str, window: Window, status: u16) -> &Self {
        self.replies
            .lock()
            .insert((symbol.to_string(), window.end), Reply::Status(status));
        self
    }

    /// URLs requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.lock().push(url.to_string());

        let parsed = Url::parse(url).map_err(|e| AppError::Internal(e.to_string()))?;
        let symbol = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();
        let end: i64 = parsed
            .query_pairs()
            .find(|(key, _)| key == "period2")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or_default();

        match self.replies.lock().get(&(symbol, end)) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(AppError::HttpStatus {
                status: *status,
                reason: "Stubbed".to_string(),
            }),
            None => Err(AppError::HttpStatus {
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}
