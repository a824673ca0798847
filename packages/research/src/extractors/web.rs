//! HTTP-backed content extractor.

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use super::html;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::ContentExtractor;
use crate::types::article::ExtractedContent;
use crate::types::config::ExtractorConfig;

/// Extractor that fetches pages over HTTP and runs the article heuristic,
/// falling back to paragraph scraping.
///
/// # Example
///
/// ```rust,ignore
/// let extractor = WebExtractor::new(ExtractorConfig::default())?;
/// let content = extractor.extract("https://example.com/story").await?;
/// println!("{} ({} chars via {})", content.title, content.body_chars(), content.method);
/// ```
pub struct WebExtractor {
    client: reqwest::Client,
    config: ExtractorConfig,
}

impl WebExtractor {
    /// Create an extractor with its own HTTP client.
    pub fn new(config: ExtractorConfig) -> ExtractResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ExtractError::Http(Box::new(e)))?;

        Ok(Self { client, config })
    }

    /// Use a caller-provided HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn parse_url(url: &str) -> ExtractResult<Url> {
        let parsed = Url::parse(url).map_err(|_| ExtractError::InvalidUrl {
            url: url.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            _ => Err(ExtractError::InvalidUrl {
                url: url.to_string(),
            }),
        }
    }

    async fn send(&self, url: &Url) -> ExtractResult<reqwest::Response> {
        debug!(url = %url, "Fetching page");
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ExtractError::Http(Box::new(e)))
    }

    /// HTML for the article strategy. Non-success statuses are errors.
    async fn fetch_html(&self, url: &Url) -> ExtractResult<String> {
        let response = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ExtractError::Http(Box::new(e)))
    }

    /// HTML for the paragraph fallback, whatever the status.
    ///
    /// Error pages are scraped like any other page; only transport
    /// failures are errors here.
    async fn fetch_html_raw(&self, url: &Url) -> ExtractResult<String> {
        let response = self.send(url).await?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = %status, "Scraping non-success response");
        }

        response
            .text()
            .await
            .map_err(|e| ExtractError::Http(Box::new(e)))
    }
}

#[async_trait]
impl ContentExtractor for WebExtractor {
    async fn extract(&self, url: &str) -> ExtractResult<ExtractedContent> {
        let url = Self::parse_url(url)?;

        let result = match self.fetch_html(&url).await {
            Ok(html) => html::extract_from_html(&html, &self.config),
            Err(e) => {
                warn!(url = %url, error = %e, "Article fetch failed, fetching raw page for fallback");
                let html = self.fetch_html_raw(&url).await?;
                html::extract_paragraphs_from_html(&html, &self.config)
            }
        };

        result.inspect_err(|e| {
            warn!(url = %url, error = %e, "Extraction failed");
        })
    }

    fn name(&self) -> &str {
        "web"
    }
}
