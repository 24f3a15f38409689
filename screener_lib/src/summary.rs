//! Cross-company, per-metric summaries aligned on a shared set of periods.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use screener_api::CompanyTable;

use crate::extract::{ExtractError, MetricMatcher};
use crate::period::sort_periods;
use crate::report::{SkipRecord, SkipStage};

/// Header of the first column of every summary.
pub const CODE_COLUMN: &str = "Stock Code";

/// A logical metric: the label variants that identify it and where its
/// summary is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGroup {
    pub name: String,
    pub file_name: String,
    pub candidates: Vec<String>,
}

impl MetricGroup {
    /// Builds a group whose name is its candidates joined with `" / "`.
    pub fn new(file_name: &str, candidates: &[&str]) -> Self {
        Self {
            name: candidates.join(" / "),
            file_name: file_name.to_string(),
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Sales/Revenue, Net Profit and Operating Profit.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("sales_revenue_summary.csv", &["Sales", "Revenue"]),
            Self::new("net_profit_summary.csv", &["Net Profit"]),
            Self::new("operating_profit_summary.csv", &["Operating Profit"]),
        ]
    }
}

/// Company tables keyed by stock code, in insertion order. A `None` entry is
/// a company whose fetch or parse failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyTables {
    entries: Vec<(String, Option<CompanyTable>)>,
}

impl CompanyTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `code`, keeping its original position.
    pub fn insert(&mut self, code: impl Into<String>, table: Option<CompanyTable>) {
        let code = code.into();
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = table,
            None => self.entries.push((code, table)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&CompanyTable> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .and_then(|(_, t)| t.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&CompanyTable>)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), t.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Option<CompanyTable>)> for CompanyTables {
    fn from_iter<I: IntoIterator<Item = (String, Option<CompanyTable>)>>(iter: I) -> Self {
        let mut tables = Self::new();
        for (code, table) in iter {
            tables.insert(code, table);
        }
        tables
    }
}

/// One company's values under the summary's period columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub code: String,
    /// Aligned with [`SummaryTable::periods`]; `None` where the company has
    /// no column for that period.
    pub values: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    metric: String,
    periods: Vec<String>,
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn empty(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            periods: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Chronologically sorted union of the matched companies' periods.
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// `"Stock Code"` followed by the periods.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(CODE_COLUMN.to_string())
            .chain(self.periods.iter().cloned())
            .collect()
    }

    /// Value for one company and period; `None` if either is absent.
    pub fn value(&self, code: &str, period: &str) -> Option<&str> {
        let col = self.periods.iter().position(|p| p == period)?;
        let row = self.rows.iter().find(|r| r.code == code)?;
        row.values.get(col)?.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A built summary plus the companies it left out and why.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub table: SummaryTable,
    pub skips: Vec<SkipRecord>,
}

/// Builds one metric's summary over every company in `tables`.
///
/// Companies without a table are passed over silently (their fetch or parse
/// failure was already reported). Companies with an empty table or no
/// matching row are omitted and returned as skips. Only the candidate list
/// itself being unusable is an error.
pub fn build_summary(
    tables: &CompanyTables,
    group: &MetricGroup,
) -> Result<SummaryOutcome, ExtractError> {
    let matcher = MetricMatcher::new(&group.candidates)?;
    let stage = || SkipStage::Extract {
        metric: group.name.clone(),
    };

    let mut skips = Vec::new();
    let mut matched: Vec<(&str, HashMap<&str, &str>)> = Vec::new();
    let mut universe: HashSet<&str> = HashSet::new();

    for (code, table) in tables.iter() {
        let Some(table) = table else {
            tracing::debug!("No table for {}, leaving it out of {}", code, group.name);
            continue;
        };
        match matcher.find(table) {
            Ok(row) => {
                let values = row.values_by_period();
                universe.extend(values.keys().copied());
                tracing::debug!("{} - {} data: {:?}", code, group.name, values);
                matched.push((code, values));
            }
            Err(e) => skips.push(SkipRecord::new(code, stage(), e)),
        }
    }

    let mut periods: Vec<String> = universe.into_iter().map(str::to_string).collect();
    sort_periods(&mut periods);

    let rows = matched
        .into_iter()
        .map(|(code, values)| SummaryRow {
            code: code.to_string(),
            values: periods
                .iter()
                .map(|p| values.get(p.as_str()).map(|v| v.to_string()))
                .collect(),
        })
        .collect();

    Ok(SummaryOutcome {
        table: SummaryTable {
            metric: group.name.clone(),
            periods,
            rows,
        },
        skips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(periods: &[&str], rows: &[&[&str]]) -> CompanyTable {
        let headers = std::iter::once("")
            .chain(periods.iter().copied())
            .map(str::to_string)
            .collect();
        CompanyTable::new(
            headers,
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn net_profit() -> MetricGroup {
        MetricGroup::new("net_profit_summary.csv", &["Net Profit"])
    }

    #[test]
    fn aligns_companies_on_union_of_periods() {
        let tables: CompanyTables = vec![
            (
                "A".to_string(),
                Some(company(&["Q1", "Q2"], &[&["Net Profit +", "1", "2"]])),
            ),
            (
                "B".to_string(),
                Some(company(&["Q2", "Q3"], &[&["Net Profit +", "20", "30"]])),
            ),
        ]
        .into_iter()
        .collect();

        let outcome = build_summary(&tables, &net_profit()).unwrap();
        let summary = outcome.table;

        assert_eq!(summary.periods(), &["Q1", "Q2", "Q3"]);
        assert_eq!(summary.headers(), vec!["Stock Code", "Q1", "Q2", "Q3"]);
        assert_eq!(
            summary.rows()[0].values,
            vec![Some("1".to_string()), Some("2".to_string()), None]
        );
        assert_eq!(
            summary.rows()[1].values,
            vec![None, Some("20".to_string()), Some("30".to_string())]
        );
        assert!(outcome.skips.is_empty());
    }

    #[test]
    fn periods_sorted_chronologically() {
        let tables: CompanyTables = vec![(
            "A".to_string(),
            Some(company(
                &["Mar 2024", "Jun 2023", "Dec 2023"],
                &[&["Net Profit", "3", "1", "2"]],
            )),
        )]
        .into_iter()
        .collect();

        let summary = build_summary(&tables, &net_profit()).unwrap().table;
        assert_eq!(summary.periods(), &["Jun 2023", "Dec 2023", "Mar 2024"]);
        assert_eq!(summary.value("A", "Mar 2024"), Some("3"));
    }

    #[test]
    fn unmatched_and_empty_companies_are_skipped() {
        let mut tables = CompanyTables::new();
        tables.insert("A", Some(company(&["Q1"], &[&["Expenses", "1"]])));
        tables.insert("B", Some(company(&["Q1"], &[])));
        tables.insert("C", None);
        tables.insert("D", Some(company(&["Q9"], &[&["Net Profit", "7"]])));

        let outcome = build_summary(&tables, &net_profit()).unwrap();
        let codes: Vec<&str> = outcome.table.rows().iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["D"]);
        assert_eq!(outcome.table.periods(), &["Q9"]);

        let skipped: Vec<&str> = outcome.skips.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(skipped, vec!["A", "B"]);
        assert_eq!(
            outcome.skips[0].stage,
            SkipStage::Extract {
                metric: "Net Profit".into()
            }
        );
    }

    #[test]
    fn unmatched_company_periods_do_not_leak() {
        let mut tables = CompanyTables::new();
        tables.insert("A", Some(company(&["Mar 2020"], &[&["Sales", "1"]])));
        tables.insert("B", Some(company(&["Mar 2024"], &[&["Net Profit", "2"]])));

        let summary = build_summary(&tables, &net_profit()).unwrap().table;
        assert_eq!(summary.periods(), &["Mar 2024"]);
    }

    #[test]
    fn no_matches_gives_empty_summary() {
        let mut tables = CompanyTables::new();
        tables.insert("A", Some(company(&["Q1"], &[&["Expenses", "1"]])));

        let sales = MetricGroup::new("sales_revenue_summary.csv", &["Sales", "Revenue"]);
        let outcome = build_summary(&tables, &sales).unwrap();
        assert!(outcome.table.is_empty());
        assert!(outcome.table.periods().is_empty());
        assert_eq!(outcome.table.metric(), "Sales / Revenue");
        assert_eq!(outcome.skips.len(), 1);
    }

    #[test]
    fn empty_candidate_list_is_an_error() {
        let group = MetricGroup {
            name: "Nothing".into(),
            file_name: "nothing.csv".into(),
            candidates: vec![],
        };
        assert!(build_summary(&CompanyTables::new(), &group).is_err());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut tables = CompanyTables::new();
        tables.insert("A", None);
        tables.insert("B", None);
        tables.insert("A", Some(company(&["Q1"], &[&["Sales", "1"]])));

        let codes: Vec<&str> = tables.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert!(tables.get("A").is_some());
        assert!(tables.get("B").is_none());
        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn default_groups() {
        let groups = MetricGroup::defaults();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Sales / Revenue", "Net Profit", "Operating Profit"]);
        assert_eq!(groups[0].file_name, "sales_revenue_summary.csv");
    }
}
