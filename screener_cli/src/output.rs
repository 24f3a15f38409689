use std::io::Write;

use anyhow::{bail, Result};
use serde::Serialize;
use screener_lib::{write_csv, CompanyTable, RunReport, SummaryTable, Tabular};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(match raw.trim().to_lowercase().as_str() {
            "table" => Self::Table,
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            other => bail!(
                "unknown output format '{}'. Valid formats: table, json, csv, markdown",
                other
            ),
        })
    }
}

#[derive(Tabled, Serialize)]
struct SkipRow {
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Stage")]
    #[serde(rename = "Stage")]
    stage: String,
    #[tabled(rename = "Reason")]
    #[serde(rename = "Reason")]
    reason: String,
}

/// One filled summary cell, flattened so every metric fits one CSV header.
#[derive(Serialize)]
struct SummaryValueRow {
    #[serde(rename = "Metric")]
    metric: String,
    #[serde(rename = "Stock Code")]
    code: String,
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "Value")]
    value: String,
}

/// Everything a `run` prints to stdout in JSON mode, as one document.
#[derive(Serialize)]
struct RunOutput<'a> {
    summaries: &'a [SummaryTable],
    report: &'a RunReport,
}

// -- Row builders --

fn build_skip_rows(report: &RunReport) -> Vec<SkipRow> {
    report
        .skips
        .iter()
        .map(|s| SkipRow {
            code: s.code.clone(),
            stage: s.stage.to_string(),
            reason: s.reason.clone(),
        })
        .collect()
}

fn build_summary_value_rows(summaries: &[SummaryTable]) -> Vec<SummaryValueRow> {
    let mut rows = Vec::new();
    for summary in summaries {
        for row in summary.rows() {
            for (period, value) in summary.periods().iter().zip(&row.values) {
                if let Some(value) = value {
                    rows.push(SummaryValueRow {
                        metric: summary.metric().to_string(),
                        code: row.code.clone(),
                        period: period.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
    }
    rows
}

/// Grid with one column per header; column count is only known at runtime.
fn build_grid<T: Tabular + ?Sized>(table: &T) -> Table {
    let mut builder = Builder::default();
    builder.push_record(table.headers());
    for record in table.records() {
        builder.push_record(record);
    }
    builder.build()
}

fn render<T: Tabular + ?Sized>(table: &T, markdown: bool) -> String {
    let mut grid = build_grid(table);
    if markdown {
        grid.with(Style::markdown());
    }
    grid.to_string()
}

fn render_skips(report: &RunReport, markdown: bool) -> String {
    let mut table = Table::new(build_skip_rows(report));
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn write_serialized<W: Write, R: Serialize>(writer: W, rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_company_table(table: &CompanyTable, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render(table, false)),
        OutputFormat::Markdown => println!("{}", render(table, true)),
        OutputFormat::Csv => write_csv(std::io::stdout(), table)?,
        OutputFormat::Json => print_json(table),
    }
    Ok(())
}

/// Prints a finished run. JSON and CSV each produce a single document on
/// stdout; in CSV mode the skip list goes to stderr.
pub fn print_run(
    summaries: &[SummaryTable],
    report: &RunReport,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&RunOutput { summaries, report }),
        OutputFormat::Csv => {
            write_serialized(std::io::stdout(), build_summary_value_rows(summaries))?;
            if !report.is_clean() {
                write_serialized(std::io::stderr(), build_skip_rows(report))?;
            }
        }
        OutputFormat::Table | OutputFormat::Markdown => {
            let markdown = *format == OutputFormat::Markdown;
            for summary in summaries {
                eprintln!("\n{} summary:", summary.metric());
                println!("{}", render(summary, markdown));
            }
            if !report.is_clean() {
                println!("{}", render_skips(report, markdown));
            }
        }
    }
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
