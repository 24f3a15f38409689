//! Locates the row for one logical metric in a company table.
//!
//! Matching is substring-based: a candidate matches any label that contains
//! it case-insensitively, optionally followed by the site's `+` expand
//! marker. A label such as "Other Operating Revenue" therefore matches the
//! candidate "Revenue"; callers order their candidates with that in mind.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use screener_api::CompanyTable;

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("table has no data rows")]
    EmptyTable,
    #[error("no candidate labels given")]
    NoCandidates,
    #[error("none of [{}] found", .candidates.join(", "))]
    NotFound { candidates: Vec<String> },
    #[error("invalid label pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Compiled candidate labels for one metric, checked in the given order.
#[derive(Debug, Clone)]
pub struct MetricMatcher {
    candidates: Vec<String>,
    patterns: Vec<Regex>,
}

/// The first table row that matched, borrowed from its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricRow<'t> {
    headers: &'t [String],
    cells: &'t [String],
}

impl MetricMatcher {
    pub fn new<S: AsRef<str>>(candidates: &[S]) -> Result<Self, ExtractError> {
        if candidates.is_empty() {
            return Err(ExtractError::NoCandidates);
        }
        let candidates: Vec<String> = candidates.iter().map(|c| c.as_ref().to_string()).collect();
        let patterns = candidates
            .iter()
            .map(|c| {
                RegexBuilder::new(&format!(r"{}\s*\+?", regex::escape(c)))
                    .case_insensitive(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            candidates,
            patterns,
        })
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// True when any candidate occurs in `label`.
    pub fn matches(&self, label: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(label))
    }

    /// Scans candidates in order and, for each, rows top to bottom. Returns
    /// the first row whose label matches.
    pub fn find<'t>(&self, table: &'t CompanyTable) -> Result<MetricRow<'t>, ExtractError> {
        if table.is_empty() {
            return Err(ExtractError::EmptyTable);
        }
        for (candidate, pattern) in self.candidates.iter().zip(&self.patterns) {
            let hit = table
                .rows()
                .iter()
                .find(|row| row.first().is_some_and(|label| pattern.is_match(label)));
            if let Some(row) = hit {
                tracing::debug!("Candidate '{}' matched row '{}'", candidate, row[0]);
                return Ok(MetricRow {
                    headers: table.headers(),
                    cells: row,
                });
            }
        }
        Err(ExtractError::NotFound {
            candidates: self.candidates.clone(),
        })
    }
}

/// One-shot form of [`MetricMatcher::find`].
pub fn extract_metric<'t, S: AsRef<str>>(
    table: &'t CompanyTable,
    candidates: &[S],
) -> Result<MetricRow<'t>, ExtractError> {
    MetricMatcher::new(candidates)?.find(table)
}

impl<'t> MetricRow<'t> {
    /// Full row, label cell included.
    pub fn cells(&self) -> &'t [String] {
        self.cells
    }

    pub fn label(&self) -> &'t str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }

    /// Period header to cell value, label column excluded. When a period
    /// header repeats, the rightmost column wins.
    pub fn values_by_period(&self) -> HashMap<&'t str, &'t str> {
        self.headers
            .iter()
            .zip(self.cells)
            .skip(1)
            .map(|(h, v)| (h.as_str(), v.as_str()))
            .collect()
    }
}
