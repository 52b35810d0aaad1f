//! Tabular quote parsing
//!
//! The provider answers with comma-delimited text: a header record followed
//! by data records. Only the first data record is ever used.

use crate::error::{AppError, Result};
use csv::{ReaderBuilder, StringRecord};

/// Column used for the price when the header has no `Close` column
pub const CLOSE_FIELD_FALLBACK: usize = 1;

fn header_and_first_record(text: &str) -> Result<(StringRecord, StringRecord)> {
    let mut records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .into_records();

    let header = records
        .next()
        .ok_or_else(|| AppError::Parse("response is empty, expected a header record".to_string()))??;
    let record = records
        .next()
        .ok_or_else(|| AppError::Parse("response has a header but no data record".to_string()))??;

    Ok((header, record))
}

/// Return the fields of the second record, discarding the header.
pub fn parse_record(text: &str) -> Result<Vec<String>> {
    let (_, record) = header_and_first_record(text)?;
    Ok(record.iter().map(str::to_string).collect())
}

/// Convert a price token using `.` as the decimal separator.
pub fn parse_price(token: &str) -> Result<f64> {
    let trimmed = token.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AppError::Parse(format!("price token '{}' is not a number", trimmed)))?;

    if !value.is_finite() {
        return Err(AppError::Parse(format!("price token '{}' is not finite", trimmed)));
    }

    Ok(value)
}

/// First data row of a daily quote response
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub date: String,
    pub close: f64,
}

impl QuoteRow {
    /// Parse the first data row, locating the close column by its header name.
    pub fn from_csv(text: &str) -> Result<Self> {
        let (header, record) = header_and_first_record(text)?;

        let close_idx = header
            .iter()
            .position(|name| name.trim().eq_ignore_ascii_case("close"))
            .unwrap_or(CLOSE_FIELD_FALLBACK);

        let token = record.get(close_idx).ok_or_else(|| {
            AppError::Parse(format!(
                "data record has {} fields, no close field at index {}",
                record.len(),
                close_idx
            ))
        })?;

        Ok(Self {
            date: record.get(0).unwrap_or_default().trim().to_string(),
            close: parse_price(token)?,
        })
    }
}
