//! SQLite database models

use serde::{Deserialize, Serialize};

/// Ticker row; `id` is the join key for prices and conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub id: i64,
    pub symbol: String,
}

/// Closing price recorded for a ticker on a date (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: i64,
    pub ticker_id: i64,
    pub price: f64,
    pub date: String,
}

/// Day-over-day price delta (today minus yesterday)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRecord {
    pub id: i64,
    pub ticker_id: i64,
    pub delta: f64,
}
