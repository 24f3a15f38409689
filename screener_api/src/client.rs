//! HTTP client for the Screener company pages.

use std::time::Duration;

use url::Url;

use crate::{user_agent::get_user_agent, Error, ReportView};

/// Production site root.
pub const DEFAULT_BASE_URL: &str = "https://www.screener.in";

/// HTTP client for company results pages.
///
/// Sends requests with browser-like headers and a randomized user agent.
/// One GET per call, 30-second timeout, no retries.
pub struct Client {
    /// Site root. Defaults to [`DEFAULT_BASE_URL`].
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client pointing at the production site.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Request(e)
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Builds `{base}/company/{code}/` (plus `consolidated/` for that view).
    /// The code is encoded as a single path segment.
    pub fn company_url(&self, code: &str, view: ReportView) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_url, e);
            Error::InvalidUrl(format!("{}: {}", self.base_url, e))
        })?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base", self.base_url)))?;
            segments.pop_if_empty().push("company").push(code);
            if let Some(segment) = view.path_segment() {
                segments.push(segment);
            }
            segments.push("");
        }
        Ok(url)
    }

    /// Fetches the raw HTML of a company's results page.
    pub async fn fetch_company_page(&self, code: &str, view: ReportView) -> Result<String, Error> {
        let url = self.company_url(code, view)?;
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("upgrade-insecure-requests", "1")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch page for {}: {}", code, e);
                Error::Request(e)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body for {}: {}", code, e);
            Error::Request(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request for {} failed with status {}", code, status);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
