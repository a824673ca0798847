//! Google Programmable Search (Custom Search JSON API) client.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{SearchError, SearchResult};
use crate::security::ApiKey;
use crate::traits::searcher::{SearchResponse, WebSearcher};

/// Default Custom Search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Page size requested for every query.
pub const RESULTS_PER_QUERY: u32 = 5;

/// Per-request timeout unless overridden.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Custom Search client.
///
/// No retries: a failed query just contributes no URLs.
pub struct GoogleSearch {
    api_key: ApiKey,
    engine_id: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GoogleSearch {
    /// Create a client from an API key and a search engine id (`cx`).
    pub fn new(api_key: impl Into<ApiKey>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: DEFAULT_SEARCH_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Point at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a caller-provided HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl WebSearcher for GoogleSearch {
    async fn search(&self, query: &str) -> SearchResult<SearchResponse> {
        let num = RESULTS_PER_QUERY.to_string();
        debug!(query = %query, "Searching");

        let response = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("key", self.api_key.expose()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(query = %query, status = %status, "Search API rejected query");
            return Ok(SearchResponse::failed(body));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        debug!(query = %query, results = parsed.items.len(), "Search completed");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/customsearch/v1", addr)
    }

    #[tokio::test]
    async fn test_sends_credentials_and_page_size() {
        let router = Router::new().route(
            "/customsearch/v1",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(serde_json::json!({
                    "items": [{
                        "title": format!("{}|{}|{}", params["key"], params["cx"], params["num"]),
                        "link": format!("https://example.com/?q={}", params["q"]),
                    }]
                }))
            }),
        );
        let base = serve(router).await;

        let searcher = GoogleSearch::new("secret-key", "engine-1").with_base_url(base);
        let response = searcher.search("rust").await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].title, "secret-key|engine-1|5");
        assert_eq!(response.items[0].link, "https://example.com/?q=rust");
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_yields_empty_result_with_body() {
        let router = Router::new().route(
            "/customsearch/v1",
            get(|| async { (StatusCode::FORBIDDEN, "daily limit exceeded") }),
        );
        let base = serve(router).await;

        let searcher = GoogleSearch::new("k", "cx").with_base_url(base);
        let response = searcher.search("anything").await.unwrap();

        assert!(response.items.is_empty());
        assert_eq!(response.error.as_deref(), Some("daily limit exceeded"));
    }

    #[tokio::test]
    async fn test_stalled_endpoint_times_out() {
        let router = Router::new().route(
            "/customsearch/v1",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(serde_json::json!({ "items": [] }))
            }),
        );
        let base = serve(router).await;

        let searcher = GoogleSearch::new("k", "cx")
            .with_base_url(base)
            .with_timeout(std::time::Duration::from_millis(100));

        assert!(matches!(searcher.search("slow").await, Err(SearchError::Http(_))));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let searcher = GoogleSearch::new("AIza-secret", "cx");
        assert_eq!(format!("{:?}", searcher.api_key), "ApiKey([REDACTED])");
    }
}
