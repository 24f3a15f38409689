//! Library layer for the quarterly results screener: metric extraction,
//! cross-company summaries, CSV export, and the batch helpers the CLI drives.
//!
//! Wraps the `screener_api` crate (page fetch + table parse) and keeps every
//! per-company failure local, so a batch always produces whatever summaries
//! it can.

pub mod batch;
pub mod error;
pub mod export;
pub mod extract;
pub mod period;
pub mod report;
pub mod scrape;
pub mod summary;
pub mod validation;
pub mod watchlist;

pub use screener_api;
pub use screener_api::{CompanyTable, ReportView, RESULTS_TABLE_SELECTOR};

pub use batch::{collect_company_tables, summarize};
pub use error::ScreenerError;
pub use export::{company_file_name, export_csv, write_csv, ExportError, Tabular};
pub use extract::{extract_metric, ExtractError, MetricMatcher, MetricRow};
pub use report::{RunReport, SkipRecord, SkipStage};
pub use scrape::{QuarterlyScraper, ScrapeError};
pub use summary::{build_summary, CompanyTables, MetricGroup, SummaryOutcome, SummaryRow, SummaryTable};
pub use watchlist::{load_default_watchlist, load_watchlist_file, parse_watchlist, Watchlist, WatchlistError};
