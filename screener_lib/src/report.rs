//! Structured record of what a batch run did and what it skipped.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Where in the per-company pipeline a skip happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipStage {
    /// The stock code was rejected before any request.
    Validation,
    /// Non-success status or transport failure.
    Fetch,
    /// The page had no results table.
    Parse,
    /// No row matched the metric's candidate labels.
    Extract { metric: String },
    /// A CSV file could not be written.
    Export { file: String },
}

impl fmt::Display for SkipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Fetch => write!(f, "fetch"),
            Self::Parse => write!(f, "parse"),
            Self::Extract { metric } => write!(f, "extract ({})", metric),
            Self::Export { file } => write!(f, "export ({})", file),
        }
    }
}

/// One company skipped at one stage. `code` is `"*"` when the skip applies
/// to a whole metric rather than a single company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipRecord {
    pub code: String,
    pub stage: SkipStage,
    pub reason: String,
}

impl SkipRecord {
    pub fn new(code: impl Into<String>, stage: SkipStage, reason: impl fmt::Display) -> Self {
        Self {
            code: code.into(),
            stage,
            reason: reason.to_string(),
        }
    }
}

/// Outcome of a batch run, returned alongside the tables it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Codes whose results table was fetched and parsed, in run order.
    pub scraped: Vec<String>,
    pub skips: Vec<SkipRecord>,
    pub files_written: Vec<PathBuf>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scraped(&mut self, code: &str) {
        self.scraped.push(code.to_string());
    }

    /// Stores the skip and logs it as a warning.
    pub fn record_skip(&mut self, skip: SkipRecord) {
        tracing::warn!("Skipping {} at {}: {}", skip.code, skip.stage, skip.reason);
        self.skips.push(skip);
    }

    pub fn record_file(&mut self, path: PathBuf) {
        tracing::info!("Wrote {}", path.display());
        self.files_written.push(path);
    }

    /// Skips recorded for one company, across all stages.
    pub fn skips_for<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a SkipRecord> + 'a {
        self.skips.iter().filter(move |s| s.code == code)
    }

    /// True when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_are_filtered_by_code() {
        let mut report = RunReport::new();
        report.record_skip(SkipRecord::new("AAA", SkipStage::Fetch, "status 404"));
        report.record_skip(SkipRecord::new(
            "BBB",
            SkipStage::Extract {
                metric: "Net Profit".into(),
            },
            "none of [Net Profit] found",
        ));
        report.record_skip(SkipRecord::new("AAA", SkipStage::Parse, "table missing"));

        assert_eq!(report.skips_for("AAA").count(), 2);
        assert_eq!(report.skips_for("BBB").count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn new_report_is_clean() {
        let report = RunReport::new();
        assert!(report.is_clean());
        assert!(report.scraped.is_empty());
    }

    #[test]
    fn stage_display() {
        let stage = SkipStage::Export {
            file: "net_profit_summary.csv".into(),
        };
        assert_eq!(stage.to_string(), "export (net_profit_summary.csv)");
        assert_eq!(SkipStage::Validation.to_string(), "validation");
    }
}
