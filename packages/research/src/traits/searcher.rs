//! Web searcher trait.
//!
//! The search client returns ranked links for one query. A provider-side
//! failure (non-success status) is not an error: it comes back as an
//! empty result with the provider's message in `error`, so the pipeline
//! can treat it as "this query contributed nothing" and move on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchResult;

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    pub link: String,
}

impl SearchItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Results for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Hits in rank order.
    #[serde(default)]
    pub items: Vec<SearchItem>,

    /// Provider error body when the request was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Successful response.
    pub fn from_items(items: Vec<SearchItem>) -> Self {
        Self { items, error: None }
    }

    /// Rejected request: no items, provider message kept.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Links in rank order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.link.as_str())
    }
}

#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web for one query.
    async fn search(&self, query: &str) -> SearchResult<SearchResponse>;
}

#[async_trait]
impl<T: WebSearcher + ?Sized> WebSearcher for std::sync::Arc<T> {
    async fn search(&self, query: &str) -> SearchResult<SearchResponse> {
        (**self).search(query).await
    }
}
