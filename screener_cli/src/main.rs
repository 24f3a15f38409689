mod commands;
mod output;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Scrape quarterly results and build cross-company metric summaries")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Site root to scrape (overrides SCREENER_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the watchlist and write per-company and summary CSVs
    Run(commands::run::RunArgs),
    /// Scrape one company and print its quarterly results table
    Show(commands::show::ShowArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("screener=info".parse()?),
        )
        .with_target(false)
        .with_writer(|| progress::LogWriter)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output)?;
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("SCREENER_BASE_URL").ok());

    match &cli.command {
        Commands::Run(args) => commands::run::run(args, base_url.as_deref(), &format).await?,
        Commands::Show(args) => commands::show::run(args, base_url.as_deref(), &format).await?,
    }

    Ok(())
}
