//! Daily request windows and quote URLs

use crate::error::{AppError, Result};
use chrono::{Days, Local, NaiveDate, TimeDelta, TimeZone};
use url::Url;

/// Half-open `[start, end)` time range in Unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    /// Window covering the day that ends `days_back` days before `today` starts.
    ///
    /// `days_back = 0` is `[yesterday 00:00, today 00:00)`,
    /// `days_back = 1` is `[two days ago 00:00, yesterday 00:00)`.
    pub fn day_ending(today: NaiveDate, days_back: u64) -> Result<Self> {
        let end_day = shift(today, days_back)?;
        let start_day = shift(end_day, 1)?;

        Ok(Self {
            start: local_midnight(start_day)?,
            end: local_midnight(end_day)?,
        })
    }

    pub fn today(today: NaiveDate) -> Result<Self> {
        Self::day_ending(today, 0)
    }

    pub fn yesterday(today: NaiveDate) -> Result<Self> {
        Self::day_ending(today, 1)
    }
}

fn shift(day: NaiveDate, days_back: u64) -> Result<NaiveDate> {
    day.checked_sub_days(Days::new(days_back))
        .ok_or_else(|| AppError::Internal(format!("date {} out of range", day)))
}

/// Unix timestamp of local midnight on `day`
fn local_midnight(day: NaiveDate) -> Result<i64> {
    midnight_in(&Local, day)
}

/// Unix timestamp of midnight on `day` in `tz`.
///
/// Where a DST jump skips midnight the day starts one hour later.
fn midnight_in<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> Result<i64> {
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Internal(format!("no midnight for {}", day)))?;

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppError::Internal(format!("no local start of day for {}", day)))
}

/// Build the daily-history download URL for `symbol` over `window`.
pub fn quote_url(base: &str, symbol: &str, window: Window) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::Config(format!("Invalid quote URL '{}': {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| AppError::Config(format!("Quote URL '{}' cannot take a path", base)))?
        .pop_if_empty()
        .push(symbol);

    url.query_pairs_mut()
        .append_pair("period1", &window.start.to_string())
        .append_pair("period2", &window.end.to_string())
        .append_pair("interval", "1d")
        .append_pair("events", "history")
        .append_pair("includeAdjustedClose", "true");

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_windows_are_adjacent() {
        let today = date(2024, 3, 15);
        let t = Window::today(today).unwrap();
        let y = Window::yesterday(today).unwrap();

        assert_eq!(y.end, t.start);
        assert!(t.start < t.end);
        assert!(y.start < y.end);
    }

    #[test]
    fn test_window_spans_one_day() {
        let w = Window::today(date(2024, 6, 12)).unwrap();
        let span = w.end - w.start;
        // One hour either way for DST transitions
        assert!((82_800..=90_000).contains(&span), "span was {span}");
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let w = Window::yesterday(date(2024, 3, 1)).unwrap();
        assert_eq!(w, Window::today(date(2024, 2, 29)).unwrap());
    }

    #[test]
    fn test_midnight_skipped_by_dst() {
        // Sao Paulo clocks jumped from 00:00 to 01:00 on 2018-11-04
        let tz = chrono_tz::America::Sao_Paulo;
        let start = midnight_in(&tz, date(2018, 11, 4)).unwrap();
        let expected = tz.with_ymd_and_hms(2018, 11, 4, 1, 0, 0).unwrap().timestamp();
        assert_eq!(start, expected);

        let ordinary = midnight_in(&tz, date(2018, 11, 5)).unwrap();
        assert_eq!(ordinary - start, 23 * 3600);
    }

    #[test]
    fn test_quote_url() {
        let window = Window { start: 100, end: 200 };
        let url = quote_url("https://example.com/v7/finance/download", "AAPL", window).unwrap();
        assert_eq!(
            url,
            "https://example.com/v7/finance/download/AAPL?period1=100&period2=200\
             &interval=1d&events=history&includeAdjustedClose=true"
        );
    }

    #[test]
    fn test_quote_url_escapes_symbol() {
        let window = Window { start: 1, end: 2 };
        let url = quote_url("https://example.com/download/", "BRK/B", window).unwrap();
        assert!(url.starts_with("https://example.com/download/BRK%2FB?"));
    }

    #[test]
    fn test_quote_url_rejects_bad_base() {
        let window = Window { start: 1, end: 2 };
        assert!(matches!(
            quote_url("not a url", "AAPL", window),
            Err(AppError::Config(_))
        ));
    }
}
