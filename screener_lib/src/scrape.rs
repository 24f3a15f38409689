//! Fetch and parse of one company's quarterly results.

use screener_api::{
    parse_results_table, Client, CompanyTable, ParseError, ReportView, RESULTS_TABLE_SELECTOR,
};

use crate::report::SkipStage;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] screener_api::Error),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

impl ScrapeError {
    /// The report stage this failure belongs to.
    pub fn stage(&self) -> SkipStage {
        match self {
            Self::Fetch(_) => SkipStage::Fetch,
            Self::Parse(_) => SkipStage::Parse,
        }
    }
}

/// Turns a stock code into its [`CompanyTable`].
pub struct QuarterlyScraper {
    client: Client,
    view: ReportView,
    table_selector: String,
}

impl QuarterlyScraper {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            view: ReportView::default(),
            table_selector: RESULTS_TABLE_SELECTOR.to_string(),
        }
    }

    pub fn with_view(mut self, view: ReportView) -> Self {
        self.view = view;
        self
    }

    pub fn with_table_selector(mut self, selector: &str) -> Self {
        self.table_selector = selector.to_string();
        self
    }

    pub async fn scrape_company(&self, code: &str) -> Result<CompanyTable, ScrapeError> {
        let html = self.client.fetch_company_page(code, self.view).await?;
        let table = parse_results_table(&html, &self.table_selector)?;
        Ok(table)
    }
}
