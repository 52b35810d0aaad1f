//! Console Service
//!
//! Interactive read path: symbol in, latest condition out.

use crate::error::Result;
use crate::state::AppState;
use std::io::{BufRead, Write};
use tracing::warn;

pub const PROMPT: &str = "Enter ticker to retrieve its condition (or 'exit' to exit): ";
pub const EXIT_SENTINEL: &str = "exit";

/// Result of resolving one symbol
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Condition(f64),
    /// Ticker exists but has no condition row
    NoCondition,
    NotFound,
}

/// Symbols are stored upper-case
pub fn normalize_symbol(input: &str) -> String {
    input.trim().to_uppercase()
}

pub struct ConsoleService;

impl ConsoleService {
    /// Resolve a symbol to its latest condition
    pub fn lookup(state: &AppState, symbol: &str) -> Result<Lookup> {
        let ticker_id = match state.db.find_ticker_id(symbol)? {
            Some(id) => id,
            None => return Ok(Lookup::NotFound),
        };

        Ok(match state.db.latest_condition(ticker_id)? {
            Some(delta) => Lookup::Condition(delta),
            None => Lookup::NoCondition,
        })
    }

    /// Prompt for symbols until the exit sentinel or end of input.
    ///
    /// Lookup failures are reported and the loop continues; only I/O errors
    /// on `input`/`output` end it early.
    pub fn run<R: BufRead, W: Write>(state: &AppState, mut input: R, mut output: W) -> Result<()> {
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            if entry.eq_ignore_ascii_case(EXIT_SENTINEL) {
                break;
            }

            let symbol = normalize_symbol(entry);
            match Self::lookup(state, &symbol) {
                Ok(Lookup::Condition(delta)) => writeln!(output, "Condition for {}: {}", symbol, delta)?,
                Ok(Lookup::NoCondition) => writeln!(output, "No condition recorded for {}.", symbol)?,
                Ok(Lookup::NotFound) => {
                    writeln!(output, "Ticker '{}' not found in the database.", symbol)?
                }
                Err(e) => {
                    warn!("Lookup for {} failed: {}", symbol, e);
                    writeln!(output, "Error retrieving condition for {}: {}", symbol, e)?
                }
            }
        }

        Ok(())
    }
}
