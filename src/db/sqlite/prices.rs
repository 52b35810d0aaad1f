//! Price rows

use super::models::PriceRecord;
use crate::error::Result;
use rusqlite::{params, Connection};

/// Insert a price row
pub fn insert_price(conn: &Connection, ticker_id: i64, price: f64, date: &str) -> Result<PriceRecord> {
    conn.execute(
        "INSERT INTO Prices (tickerid, price, date) VALUES (?1, ?2, ?3)",
        params![ticker_id, price, date],
    )?;

    Ok(PriceRecord {
        id: conn.last_insert_rowid(),
        ticker_id,
        price,
        date: date.to_string(),
    })
}

/// Replace any price rows for `(ticker_id, date)` with a single new row
pub fn upsert_price(conn: &Connection, ticker_id: i64, price: f64, date: &str) -> Result<PriceRecord> {
    let removed = conn.execute(
        "DELETE FROM Prices WHERE tickerid = ?1 AND date = ?2",
        params![ticker_id, date],
    )?;
    if removed > 0 {
        tracing::debug!("Replaced {} price row(s) for ticker {} on {}", removed, ticker_id, date);
    }

    insert_price(conn, ticker_id, price, date)
}

/// All price rows recorded under any ticker row with this symbol
pub fn prices_for_symbol(conn: &Connection, symbol: &str) -> Result<Vec<PriceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.tickerid, p.price, p.date
         FROM Prices p
         INNER JOIN Tickers t ON t.id = p.tickerid
         WHERE t.ticker = ?1
         ORDER BY p.id",
    )?;

    let prices = stmt
        .query_map(params![symbol], |row| {
            Ok(PriceRecord {
                id: row.get(0)?,
                ticker_id: row.get(1)?,
                price: row.get(2)?,
                date: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(prices)
}
