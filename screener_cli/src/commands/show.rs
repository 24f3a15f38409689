//! The `show` subcommand: dump one company's results table.

use anyhow::Result;
use clap::Args;
use screener_lib::validation::validate_stock_code;
use screener_lib::{QuarterlyScraper, ReportView, RESULTS_TABLE_SELECTOR};

use super::client_for;
use crate::output::{print_company_table, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// Stock code (e.g. TOLINS)
    pub code: String,

    /// Show consolidated instead of standalone results
    #[arg(long)]
    pub consolidated: bool,

    /// CSS selector of the table to extract
    #[arg(long, default_value = RESULTS_TABLE_SELECTOR)]
    pub selector: String,
}

pub async fn run(args: &ShowArgs, base_url: Option<&str>, format: &OutputFormat) -> Result<()> {
    let code = validate_stock_code(&args.code)?;
    let view = if args.consolidated {
        ReportView::Consolidated
    } else {
        ReportView::Standalone
    };

    let scraper = QuarterlyScraper::new(client_for(base_url)?)
        .with_view(view)
        .with_table_selector(&args.selector);
    let table = scraper.scrape_company(&code).await?;

    eprintln!(
        "{} ({} results): {} rows x {} periods",
        code,
        view,
        table.len(),
        table.periods().len()
    );
    print_company_table(&table, format)?;
    Ok(())
}
