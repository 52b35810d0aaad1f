//! Session Service
//!
//! The default flow: one ingestion run over the ticker file, then the
//! lookup console.

use crate::error::Result;
use crate::services::{ConsoleService, IngestReport, IngestionService};
use crate::state::AppState;
use std::io::{BufRead, Write};
use tracing::error;

pub struct SessionService;

impl SessionService {
    /// Ingest, then serve console lookups from `input` to `output`.
    ///
    /// An unreadable ticker file only cancels ingestion; the console still
    /// opens over whatever the database already holds.
    pub async fn run<R: BufRead, W: Write>(
        state: &AppState,
        input: R,
        output: W,
    ) -> Result<Option<IngestReport>> {
        let report = match IngestionService::run_from_file(state).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(
                    code = e.code(),
                    "Error reading ticker file {:?}: {}", state.config.tickers_path, e
                );
                None
            }
        };

        ConsoleService::run(state, input, output)?;
        Ok(report)
    }
}
