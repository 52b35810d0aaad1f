//! SQLite database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    // Create migrations table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    run_migration(conn, "001_tickers", CREATE_TICKERS_TABLE)?;
    run_migration(conn, "002_prices", CREATE_PRICES_TABLE)?;
    run_migration(conn, "003_todays_condition", CREATE_TODAYS_CONDITION_TABLE)?;
    run_migration(conn, "004_ticker_symbol_index", CREATE_TICKER_SYMBOL_INDEX)?;

    tracing::info!("Database migrations completed");
    Ok(())
}

fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
    // Check if migration already applied
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM migrations WHERE name = ?)",
        [name],
        |row| row.get(0),
    )?;

    if !exists {
        tracing::info!("Running migration: {}", name);
        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO migrations (name) VALUES (?)", [name])?;
    }

    Ok(())
}

// Tables keep no uniqueness or foreign keys: append runs are expected to
// create duplicate rows for the same symbol.

const CREATE_TICKERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Tickers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticker TEXT NOT NULL
);
"#;

const CREATE_PRICES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Prices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tickerid INTEGER NOT NULL,
    price REAL NOT NULL,
    date TEXT NOT NULL
);
"#;

const CREATE_TODAYS_CONDITION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS TodaysCondition (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tickerid INTEGER NOT NULL,
    state REAL NOT NULL
);
"#;

const CREATE_TICKER_SYMBOL_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_tickers_ticker ON Tickers(ticker);
CREATE INDEX IF NOT EXISTS idx_prices_tickerid ON Prices(tickerid);
CREATE INDEX IF NOT EXISTS idx_condition_tickerid ON TodaysCondition(tickerid);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, 4);

        for table in ["Tickers", "Prices", "TodaysCondition"] {
            let exists: bool = conn
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert!(exists, "missing table {table}");
        }
    }
}
