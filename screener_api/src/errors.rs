//! Error types for the site client and the table parser.

/// Errors that can occur when fetching a company page.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL or company code did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Transport failure: connect, timeout, TLS, or body read.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The site answered with a non-success status; `body` is a truncated snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

/// Errors produced while locating the results table in a page.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid CSS selector '{0}'")]
    InvalidSelector(String),
    #[error("results table not found")]
    TableNotFound,
}
