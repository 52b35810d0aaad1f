//! Runtime configuration
//!
//! Every setting has a fixed default so the binary runs with no arguments.
//! The CLI may override individual fields.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "stocks.db";
pub const DEFAULT_TICKERS_PATH: &str = "ticker.txt";
pub const DEFAULT_QUOTE_BASE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/download";
pub const DEFAULT_CONCURRENCY: usize = 1;
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// How repeated ingestion runs treat rows that already exist for a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Every run inserts fresh ticker, price and condition rows
    #[default]
    Append,
    /// Reuse the ticker row and replace today's price and the condition
    Upsert,
}

impl std::str::FromStr for WritePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(WritePolicy::Append),
            "upsert" => Ok(WritePolicy::Upsert),
            other => Err(AppError::Config(format!(
                "Unknown write policy '{}', expected 'append' or 'upsert'",
                other
            ))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub tickers_path: PathBuf,
    pub quote_base_url: String,
    /// Maximum number of tickers ingested at the same time
    pub concurrency: usize,
    pub write_policy: WritePolicy,
    pub pool_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            tickers_path: PathBuf::from(DEFAULT_TICKERS_PATH),
            quote_base_url: DEFAULT_QUOTE_BASE_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            write_policy: WritePolicy::default(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl AppConfig {
    /// Check settings that would otherwise fail deep inside a run
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(AppError::Config("concurrency must be at least 1".to_string()));
        }
        if self.pool_size == 0 {
            return Err(AppError::Config("pool size must be at least 1".to_string()));
        }
        url::Url::parse(&self.quote_base_url).map_err(|e| {
            AppError::Config(format!("Invalid quote URL '{}': {}", self.quote_base_url, e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.write_policy, WritePolicy::Append);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig {
            concurrency: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let config = AppConfig {
            quote_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_write_policy_from_str() {
        assert_eq!("append".parse::<WritePolicy>().unwrap(), WritePolicy::Append);
        assert_eq!("UPSERT".parse::<WritePolicy>().unwrap(), WritePolicy::Upsert);
        assert!("merge".parse::<WritePolicy>().is_err());
    }
}
