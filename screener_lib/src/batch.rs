//! Sequential batch helpers: scrape every code, then summarise every metric.
//!
//! Neither step fails as a whole. Per-company and per-file problems are
//! recorded in the [`RunReport`] and the batch moves on.

use std::path::Path;

use crate::export::{company_file_name, export_csv};
use crate::report::{RunReport, SkipRecord, SkipStage};
use crate::scrape::QuarterlyScraper;
use crate::summary::{build_summary, CompanyTables, MetricGroup, SummaryTable};
use crate::validation::validate_stock_code;

/// Scrapes each code in order. When `out_dir` is given, each company's raw
/// table is also written to `<code>_quarterly_results.csv` there.
///
/// `on_company` is called with each raw code once that code is finished,
/// whether it succeeded or was skipped.
/// Companies that fail to fetch or parse are kept as `None` entries; codes
/// that fail validation are left out entirely.
pub async fn collect_company_tables<F>(
    scraper: &QuarterlyScraper,
    codes: &[String],
    out_dir: Option<&Path>,
    report: &mut RunReport,
    mut on_company: F,
) -> CompanyTables
where
    F: FnMut(&str),
{
    let mut tables = CompanyTables::new();

    for raw in codes {
        collect_one(scraper, raw, out_dir, report, &mut tables).await;
        on_company(raw);
    }

    tables
}

async fn collect_one(
    scraper: &QuarterlyScraper,
    raw: &str,
    out_dir: Option<&Path>,
    report: &mut RunReport,
    tables: &mut CompanyTables,
) {
    let code = match validate_stock_code(raw) {
        Ok(code) => code,
        Err(e) => {
            report.record_skip(SkipRecord::new(raw, SkipStage::Validation, e));
            return;
        }
    };

    tracing::info!("Scraping data for {}...", code);
    match scraper.scrape_company(&code).await {
        Ok(table) => {
            tracing::info!(
                "Data for {} successfully scraped ({} rows, {} periods)",
                code,
                table.len(),
                table.periods().len()
            );
            report.record_scraped(&code);
            if let Some(dir) = out_dir {
                let file = company_file_name(&code);
                let path = dir.join(&file);
                match export_csv(&path, &table) {
                    Ok(()) => report.record_file(path),
                    Err(e) => report.record_skip(SkipRecord::new(
                        code.as_str(),
                        SkipStage::Export { file },
                        e,
                    )),
                }
            }
            tables.insert(code, Some(table));
        }
        Err(e) => {
            report.record_skip(SkipRecord::new(code.as_str(), e.stage(), &e));
            tables.insert(code, None);
        }
    }
}

/// Builds one summary per metric group, in group order. When `out_dir` is
/// given each summary is written to its group's file, header-only if no
/// company matched.
pub fn summarize(
    tables: &CompanyTables,
    groups: &[MetricGroup],
    out_dir: Option<&Path>,
    report: &mut RunReport,
) -> Vec<SummaryTable> {
    let mut summaries = Vec::with_capacity(groups.len());

    for group in groups {
        tracing::info!("Creating {} summary...", group.name);
        let summary = match build_summary(tables, group) {
            Ok(outcome) => {
                for skip in outcome.skips {
                    report.record_skip(skip);
                }
                outcome.table
            }
            Err(e) => {
                report.record_skip(SkipRecord::new(
                    "*",
                    SkipStage::Extract {
                        metric: group.name.clone(),
                    },
                    e,
                ));
                SummaryTable::empty(&group.name)
            }
        };

        tracing::info!(
            "{} summary: {} companies x {} periods",
            group.name,
            summary.rows().len(),
            summary.periods().len()
        );

        if let Some(dir) = out_dir {
            let path = dir.join(&group.file_name);
            match export_csv(&path, &summary) {
                Ok(()) => report.record_file(path),
                Err(e) => report.record_skip(SkipRecord::new(
                    "*",
                    SkipStage::Export {
                        file: group.file_name.clone(),
                    },
                    e,
                )),
            }
        }

        summaries.push(summary);
    }

    summaries
}
