use std::fmt;

use serde::{Deserialize, Serialize};

/// Which flavour of results a company page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportView {
    /// Results of the listed entity alone (`/company/{code}/`).
    #[default]
    Standalone,
    /// Group results including subsidiaries (`/company/{code}/consolidated/`).
    Consolidated,
}

impl ReportView {
    /// Extra path segment appended after the company code, if any.
    pub fn path_segment(self) -> Option<&'static str> {
        match self {
            Self::Standalone => None,
            Self::Consolidated => Some("consolidated"),
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standalone => write!(f, "standalone"),
            Self::Consolidated => write!(f, "consolidated"),
        }
    }
}
