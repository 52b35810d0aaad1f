//! Condition rows

use super::models::ConditionRecord;
use crate::error::Result;
use rusqlite::{params, Connection};

pub fn insert_condition(conn: &Connection, ticker_id: i64, delta: f64) -> Result<ConditionRecord> {
    conn.execute(
        "INSERT INTO TodaysCondition (tickerid, state) VALUES (?1, ?2)",
        params![ticker_id, delta],
    )?;

    Ok(ConditionRecord {
        id: conn.last_insert_rowid(),
        ticker_id,
        delta,
    })
}

/// Drop every condition recorded for the ticker
pub fn clear_conditions(conn: &Connection, ticker_id: i64) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM TodaysCondition WHERE tickerid = ?1",
        params![ticker_id],
    )?;
    Ok(removed)
}

/// Drop every condition for the ticker, then insert the new one
pub fn replace_condition(conn: &Connection, ticker_id: i64, delta: f64) -> Result<ConditionRecord> {
    clear_conditions(conn, ticker_id)?;
    insert_condition(conn, ticker_id, delta)
}

/// Most recently inserted condition for a ticker id
pub fn latest_condition(conn: &Connection, ticker_id: i64) -> Result<Option<f64>> {
    let result = conn.query_row(
        "SELECT state FROM TodaysCondition WHERE tickerid = ?1 ORDER BY id DESC LIMIT 1",
        params![ticker_id],
        |row| row.get(0),
    );

    match result {
        Ok(state) => Ok(Some(state)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn conditions_for_symbol(conn: &Connection, symbol: &str) -> Result<Vec<ConditionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.tickerid, c.state
         FROM TodaysCondition c
         INNER JOIN Tickers t ON t.id = c.tickerid
         WHERE t.ticker = ?1
         ORDER BY c.id",
    )?;

    let conditions = stmt
        .query_map(params![symbol], |row| {
            Ok(ConditionRecord {
                id: row.get(0)?,
                ticker_id: row.get(1)?,
                delta: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::migrations::run_migrations;
    use crate::db::sqlite::tickers::insert_ticker;

    #[test]
    fn test_latest_condition() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let ticker = insert_ticker(&conn, "AAPL").unwrap();

        assert_eq!(latest_condition(&conn, ticker.id).unwrap(), None);

        insert_condition(&conn, ticker.id, 1.5).unwrap();
        insert_condition(&conn, ticker.id, -0.25).unwrap();
        assert_eq!(latest_condition(&conn, ticker.id).unwrap(), Some(-0.25));
        assert_eq!(conditions_for_symbol(&conn, "AAPL").unwrap().len(), 2);
    }

    #[test]
    fn test_replace_condition_keeps_one_row() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let ticker = insert_ticker(&conn, "MSFT").unwrap();

        insert_condition(&conn, ticker.id, 1.0).unwrap();
        insert_condition(&conn, ticker.id, 2.0).unwrap();
        replace_condition(&conn, ticker.id, 3.0).unwrap();

        let rows = conditions_for_symbol(&conn, "MSFT").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].delta, 3.0);
    }
}
