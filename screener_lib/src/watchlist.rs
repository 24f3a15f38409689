//! Run configuration: which companies to scrape and which metrics to summarise.
//!
//! The default watchlist is embedded at compile time from
//! `seed_data/watchlist.yml`; a file given on the command line replaces it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use screener_api::{ReportView, RESULTS_TABLE_SELECTOR};
use thiserror::Error;

use crate::error::ScreenerError;
use crate::summary::MetricGroup;
use crate::validation::validate_stock_code;

#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Failed to parse watchlist YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Failed to read watchlist {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Watchlist has no stock codes")]
    NoStockCodes,
    #[error("Duplicate stock code in watchlist: {0}")]
    DuplicateCode(String),
    #[error("Metric '{0}' has no usable candidate labels")]
    EmptyCandidates(String),
    #[error("Metric '{0}' has no output file name")]
    MissingFileName(String),
    #[error("Metric '{name}' file name must be a bare file name: {file_name}")]
    InvalidFileName { name: String, file_name: String },
    #[error("Output file {0} is used by more than one metric")]
    DuplicateFileName(String),
}

fn default_table_selector() -> String {
    RESULTS_TABLE_SELECTOR.to_string()
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    pub stock_codes: Vec<String>,
    #[serde(default)]
    pub view: ReportView,
    #[serde(default = "default_table_selector")]
    pub table_selector: String,
    #[serde(default = "MetricGroup::defaults")]
    pub metrics: Vec<MetricGroup>,
}

impl Watchlist {
    /// Replaces the stock codes, keeping view, selector and metrics.
    ///
    /// Codes given here come straight from the user, so each one is
    /// validated and normalised before the watchlist is re-checked.
    pub fn with_codes(mut self, codes: Vec<String>) -> Result<Self, ScreenerError> {
        self.stock_codes = codes
            .iter()
            .map(String::as_str)
            .map(validate_stock_code)
            .collect::<Result<_, _>>()?;
        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<(), WatchlistError> {
        if self.stock_codes.is_empty() {
            return Err(WatchlistError::NoStockCodes);
        }
        let mut seen = HashSet::new();
        for code in &self.stock_codes {
            let key = code.trim().to_uppercase();
            if !seen.insert(key.clone()) {
                return Err(WatchlistError::DuplicateCode(key));
            }
        }
        let mut file_names = HashSet::new();
        for metric in &self.metrics {
            if metric.candidates.iter().all(|c| c.trim().is_empty()) {
                return Err(WatchlistError::EmptyCandidates(metric.name.clone()));
            }
            if metric.file_name.trim().is_empty() {
                return Err(WatchlistError::MissingFileName(metric.name.clone()));
            }
            if !is_bare_file_name(&metric.file_name) {
                return Err(WatchlistError::InvalidFileName {
                    name: metric.name.clone(),
                    file_name: metric.file_name.clone(),
                });
            }
            if !file_names.insert(metric.file_name.as_str()) {
                return Err(WatchlistError::DuplicateFileName(metric.file_name.clone()));
            }
        }
        Ok(())
    }
}

// Summary files are joined onto the output directory, so anything that could
// climb out of it or name a subdirectory is refused.
fn is_bare_file_name(file_name: &str) -> bool {
    !file_name.contains(['/', '\\'])
        && Path::new(file_name)
            .file_name()
            .is_some_and(|name| name == file_name)
}

/// Parse and check a watchlist from YAML content.
pub fn parse_watchlist(yaml_content: &str) -> Result<Watchlist, WatchlistError> {
    let mut watchlist: Watchlist = serde_yml::from_str(yaml_content)?;
    for metric in &mut watchlist.metrics {
        metric.candidates.retain(|c| !c.trim().is_empty());
    }
    watchlist.check()?;
    Ok(watchlist)
}

/// Load the watchlist embedded at compile time.
pub fn load_default_watchlist() -> Result<Watchlist, WatchlistError> {
    let yaml_content = include_str!("../../seed_data/watchlist.yml");
    parse_watchlist(yaml_content)
}

/// Load a watchlist from a YAML file on disk.
pub fn load_watchlist_file(path: &Path) -> Result<Watchlist, WatchlistError> {
    let yaml_content = std::fs::read_to_string(path).map_err(|source| WatchlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_watchlist(&yaml_content)
}
