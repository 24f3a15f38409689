//! The `run` subcommand: the full scrape-and-summarise batch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use screener_lib::validation::split_codes;
use screener_lib::{
    collect_company_tables, load_default_watchlist, load_watchlist_file, summarize,
    QuarterlyScraper, ReportView, RunReport,
};

use super::client_for;
use crate::output::{print_run, OutputFormat};
use crate::progress;

/// Arguments for the `run` subcommand.
#[derive(Args)]
pub struct RunArgs {
    /// Comma-separated stock codes, replacing the watchlist's codes (e.g. TOLINS,AVANTEL)
    #[arg(long)]
    pub codes: Option<String>,

    /// Watchlist YAML file (defaults to the built-in list)
    #[arg(long)]
    pub watchlist: Option<PathBuf>,

    /// Directory the CSV files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Scrape consolidated instead of standalone results
    #[arg(long)]
    pub consolidated: bool,

    /// Do not write the per-company <code>_quarterly_results.csv files
    #[arg(long)]
    pub no_company_files: bool,
}

pub async fn run(args: &RunArgs, base_url: Option<&str>, format: &OutputFormat) -> Result<()> {
    let mut watchlist = match &args.watchlist {
        Some(path) => load_watchlist_file(path)?,
        None => load_default_watchlist()?,
    };
    if let Some(ref codes) = args.codes {
        watchlist = watchlist.with_codes(split_codes(codes))?;
    }
    let view = if args.consolidated {
        ReportView::Consolidated
    } else {
        watchlist.view
    };

    let scraper = QuarterlyScraper::new(client_for(base_url)?)
        .with_view(view)
        .with_table_selector(&watchlist.table_selector);

    eprintln!(
        "Scraping {} companies ({} results) into {}",
        watchlist.stock_codes.len(),
        view,
        args.out_dir.display()
    );

    let pb = ProgressBar::new(watchlist.stock_codes.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}")?
            .progress_chars("=> "),
    );
    progress::attach(&pb);

    let mut report = RunReport::new();
    let company_dir = (!args.no_company_files).then_some(args.out_dir.as_path());
    let tables = collect_company_tables(
        &scraper,
        &watchlist.stock_codes,
        company_dir,
        &mut report,
        |code| {
            pb.set_message(code.to_string());
            pb.inc(1);
        },
    )
    .await;
    pb.finish_with_message(format!(
        "{} scraped, {} failed",
        report.scraped.len(),
        tables.len() - report.scraped.len()
    ));
    progress::detach();

    let summaries = summarize(
        &tables,
        &watchlist.metrics,
        Some(args.out_dir.as_path()),
        &mut report,
    );

    print_run(&summaries, &report, format)?;

    eprintln!(
        "\nRun complete: {} companies scraped, {} skips, {} files written",
        report.scraped.len(),
        report.skips.len(),
        report.files_written.len()
    );

    Ok(())
}
