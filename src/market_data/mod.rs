//! Market data access
//!
//! Fetching raw quote text from the provider, turning it into a price, and
//! computing the daily request windows.

pub mod fetcher;
pub mod parser;
pub mod window;

use crate::error::Result;
use async_trait::async_trait;

pub use fetcher::HttpFetcher;
pub use parser::{parse_price, parse_record, QuoteRow};
pub use window::{quote_url, Window};

/// Source of raw market data text
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a single GET and return the response body unchanged
    async fn fetch(&self, url: &str) -> Result<String>;
}
