//! Condition Service
//!
//! Computes and stores the day-over-day delta for a ticker that already has
//! today's price recorded.

use crate::db::sqlite::ConditionRecord;
use crate::error::Result;
use crate::state::AppState;
use chrono::NaiveDate;
use tracing::info;

pub struct ConditionService;

impl ConditionService {
    /// Fetch yesterday's price and persist `today_price - yesterday_price`.
    ///
    /// Any failure is returned to the caller untouched; nothing is written
    /// when the yesterday fetch or the insert fails.
    pub async fn analyze(
        state: &AppState,
        ticker_id: i64,
        symbol: &str,
        today_price: f64,
        today: NaiveDate,
    ) -> Result<ConditionRecord> {
        let yesterday_price = state.prices.get_yesterday_price(symbol, today).await?;
        let delta = today_price - yesterday_price;

        let record = state
            .db
            .record_condition(ticker_id, delta, state.config.write_policy)?;

        info!(
            "ConditionService::analyze - {} (ticker {}) {} -> {} delta {}",
            symbol, ticker_id, yesterday_price, today_price, delta
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::config::WritePolicy;
    use crate::error::ErrorKind;
    use crate::market_data::Window;
    use crate::test_support::{StubFetcher, BASE_URL};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn create_state(stub: Arc<StubFetcher>) -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("stocks.db"),
            quote_base_url: BASE_URL.to_string(),
            ..AppConfig::default()
        };
        (AppState::with_fetcher(config, stub).unwrap(), dir)
    }

    #[tokio::test]
    async fn test_analyze_records_delta() {
        let stub = Arc::new(StubFetcher::new());
        stub.price("AAPL", Window::yesterday(today()).unwrap(), 98.25);
        let (state, _dir) = create_state(stub);

        let (ticker, _) = state
            .db
            .record_price("AAPL", 100.0, "2024-05-10", WritePolicy::Append)
            .unwrap();
        let record = ConditionService::analyze(&state, ticker.id, "AAPL", 100.0, today())
            .await
            .unwrap();

        assert_eq!(record.ticker_id, ticker.id);
        assert!((record.delta - 1.75).abs() < 1e-9);
        assert_eq!(state.db.latest_condition(ticker.id).unwrap(), Some(record.delta));
    }

    #[tokio::test]
    async fn test_analyze_failure_writes_nothing() {
        let stub = Arc::new(StubFetcher::new());
        stub.status("AAPL", Window::yesterday(today()).unwrap(), 503);
        let (state, _dir) = create_state(stub);

        let (ticker, _) = state
            .db
            .record_price("AAPL", 100.0, "2024-05-10", WritePolicy::Append)
            .unwrap();
        let err = ConditionService::analyze(&state, ticker.id, "AAPL", 100.0, today())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(state.db.conditions_for_symbol("AAPL").unwrap().is_empty());
    }
}
