//! Ticker rows

use super::models::Ticker;
use crate::error::Result;
use rusqlite::{params, Connection};

/// Insert a new ticker row, even if the symbol already exists
pub fn insert_ticker(conn: &Connection, symbol: &str) -> Result<Ticker> {
    conn.execute("INSERT INTO Tickers (ticker) VALUES (?1)", params![symbol])?;

    Ok(Ticker {
        id: conn.last_insert_rowid(),
        symbol: symbol.to_string(),
    })
}

/// Most recently inserted ticker id for an exact symbol
pub fn find_ticker_id(conn: &Connection, symbol: &str) -> Result<Option<i64>> {
    let result = conn.query_row(
        "SELECT id FROM Tickers WHERE ticker = ?1 ORDER BY id DESC LIMIT 1",
        params![symbol],
        |row| row.get(0),
    );

    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Reuse the latest ticker row for a symbol, inserting one if none exists
pub fn find_or_insert_ticker(conn: &Connection, symbol: &str) -> Result<Ticker> {
    match find_ticker_id(conn, symbol)? {
        Some(id) => Ok(Ticker {
            id,
            symbol: symbol.to_string(),
        }),
        None => insert_ticker(conn, symbol),
    }
}

/// Number of ticker rows for a symbol
pub fn count_tickers(conn: &Connection, symbol: &str) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM Tickers WHERE ticker = ?1",
        params![symbol],
        |row| row.get(0),
    )?;
    Ok(count)
}
