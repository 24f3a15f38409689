//! HTTP client and results-table parser for the Screener company pages.
//!
//! [`Client`] fetches a company's results page and [`parse_results_table`]
//! turns the page's quarterly results grid into a [`CompanyTable`].

mod client;
mod errors;
mod parse;
pub mod types;
mod user_agent;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::{Error, ParseError};
pub use self::parse::{parse_results_table, RESULTS_TABLE_SELECTOR};
pub use self::types::{CompanyTable, ReportView};
