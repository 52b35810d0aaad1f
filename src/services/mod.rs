//! Services Layer
//!
//! Business logic shared by the CLI subcommands.
//!
//! # Architecture
//!
//! ```text
//! ingest  --> IngestionService --> PriceService --> Fetcher --> parser
//!                    |                   ^
//!                    v                   |
//!               SqliteDb <-- ConditionService
//!
//! console --> ConsoleService --> SqliteDb
//! ```
//!
//! # Services
//!
//! - `PriceService` - Today/yesterday closing price lookups
//! - `ConditionService` - Day-over-day delta computation and storage
//! - `IngestionService` - Per-ticker ingestion run with failure isolation
//! - `ConsoleService` - Interactive condition lookup
//! - `SessionService` - Ingestion followed by the console

pub mod condition_service;
pub mod console_service;
pub mod ingestion_service;
pub mod price_service;
pub mod session_service;

// Re-export commonly used types and services
pub use condition_service::ConditionService;
pub use console_service::{ConsoleService, Lookup};
pub use ingestion_service::{load_symbols, IngestReport, IngestionService, TickerOutcome, TickerReport};
pub use price_service::PriceService;
pub use session_service::SessionService;
