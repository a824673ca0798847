//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the research
//! library without making real model, search, or network calls. Every
//! mock is cheaply cloneable and clones share state, so a test can keep a
//! handle for assertions after moving a clone into a pipeline.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{AIError, AIResult, ExtractError, ExtractResult, SearchError, SearchResult};
use crate::traits::{
    ai::AI,
    extractor::ContentExtractor,
    searcher::{SearchItem, SearchResponse, WebSearcher},
};
use crate::types::{
    article::{ExtractedContent, ExtractionMethod},
    request::QueryPlan,
};

/// Record of a call made to [`MockAI`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAICall {
    Plan { topic: String },
    Summarize { title: String, body_chars: usize },
}

/// A mock AI with a fixed plan and deterministic summaries.
///
/// Summaries default to `"Summary of {title}"`.
#[derive(Clone, Default)]
pub struct MockAI {
    plan: Arc<RwLock<Option<Result<QueryPlan, String>>>>,
    summary_failures: Arc<RwLock<HashMap<String, String>>>,
    fail_all_summaries: Arc<RwLock<Option<String>>>,
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

impl MockAI {
    /// Create a mock that plans one query equal to the topic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this plan for every topic.
    pub fn with_plan(self, plan: QueryPlan) -> Self {
        *self.plan.write().unwrap() = Some(Ok(plan));
        self
    }

    /// Make planning fail.
    pub fn with_plan_error(self, message: impl Into<String>) -> Self {
        *self.plan.write().unwrap() = Some(Err(message.into()));
        self
    }

    /// Make summarization fail for articles with this title.
    pub fn with_summary_error(self, title: impl Into<String>, message: impl Into<String>) -> Self {
        self.summary_failures
            .write()
            .unwrap()
            .insert(title.into(), message.into());
        self
    }

    /// Make every summarization fail.
    pub fn with_all_summaries_failing(self, message: impl Into<String>) -> Self {
        *self.fail_all_summaries.write().unwrap() = Some(message.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of summarize calls so far.
    pub fn summarize_calls(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MockAICall::Summarize { .. }))
            .count()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn plan(&self, topic: &str) -> AIResult<QueryPlan> {
        self.calls.write().unwrap().push(MockAICall::Plan {
            topic: topic.to_string(),
        });

        match self.plan.read().unwrap().clone() {
            Some(Ok(plan)) => Ok(plan),
            Some(Err(message)) => Err(AIError::Api(message)),
            None => Ok(QueryPlan::new([topic], format!("Search for {}", topic))),
        }
    }

    async fn summarize(&self, title: &str, body: &str) -> AIResult<String> {
        self.calls.write().unwrap().push(MockAICall::Summarize {
            title: title.to_string(),
            body_chars: body.chars().count(),
        });

        if let Some(message) = self.fail_all_summaries.read().unwrap().clone() {
            return Err(AIError::Api(message));
        }
        if let Some(message) = self.summary_failures.read().unwrap().get(title) {
            return Err(AIError::Api(message.clone()));
        }
        Ok(format!("Summary of {}", title))
    }
}

/// A mock web searcher with canned responses per query.
///
/// Unknown queries return an empty result.
#[derive(Clone, Default)]
pub struct MockSearcher {
    responses: Arc<RwLock<HashMap<String, Result<SearchResponse, String>>>>,
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `query` with these links, in order.
    pub fn with_links(self, query: &str, links: &[&str]) -> Self {
        let items = links
            .iter()
            .enumerate()
            .map(|(i, link)| SearchItem::new(format!("Result {}", i + 1), *link))
            .collect();
        self.with_response(query, SearchResponse::from_items(items))
    }

    /// Respond to `query` with a full response.
    pub fn with_response(self, query: &str, response: SearchResponse) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(query.to_string(), Ok(response));
        self
    }

    /// Make `query` fail at the transport level.
    pub fn with_error(self, query: &str, message: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(query.to_string(), Err(message.into()));
        self
    }

    /// Queries searched so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search(&self, query: &str) -> SearchResult<SearchResponse> {
        self.queries.write().unwrap().push(query.to_string());

        match self.responses.read().unwrap().get(query).cloned() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(SearchError::Http(message.into())),
            None => Ok(SearchResponse::default()),
        }
    }
}

/// One scripted extraction outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Content(ExtractedContent),
    Error(String),
}

/// A mock extractor that plays back a script per URL.
///
/// Each call consumes the next outcome; the last outcome repeats once the
/// script runs out. Unknown URLs fail.
#[derive(Clone, Default)]
pub struct MockExtractor {
    scripts: Arc<RwLock<HashMap<String, Vec<MockOutcome>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content with a body of exactly `chars` characters.
    pub fn content(title: &str, chars: usize) -> ExtractedContent {
        ExtractedContent::new(title, "a".repeat(chars), ExtractionMethod::Article)
    }

    /// Play back `outcomes` for `url`.
    pub fn with_script(self, url: &str, outcomes: Vec<MockOutcome>) -> Self {
        self.scripts
            .write()
            .unwrap()
            .insert(url.to_string(), outcomes);
        self
    }

    /// Always succeed for `url` with a body of `chars` characters.
    pub fn with_article(self, url: &str, title: &str, chars: usize) -> Self {
        self.with_script(url, vec![MockOutcome::Content(Self::content(title, chars))])
    }

    /// Always fail for `url`.
    pub fn with_error(self, url: &str, message: impl Into<String>) -> Self {
        self.with_script(url, vec![MockOutcome::Error(message.into())])
    }

    /// How many times `url` was attempted.
    pub fn attempts(&self, url: &str) -> usize {
        self.calls.read().unwrap().iter().filter(|u| *u == url).count()
    }

    /// Every attempted URL, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract(&self, url: &str) -> ExtractResult<ExtractedContent> {
        let attempt = self.attempts(url);
        self.calls.write().unwrap().push(url.to_string());

        let outcome = self
            .scripts
            .read()
            .unwrap()
            .get(url)
            .and_then(|script| script.get(attempt).or_else(|| script.last()).cloned());

        match outcome {
            Some(MockOutcome::Content(content)) => Ok(content),
            Some(MockOutcome::Error(message)) => Err(ExtractError::Http(message.into())),
            None => Err(ExtractError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_extractor_plays_script_then_repeats_last() {
        let extractor = MockExtractor::new().with_script(
            "https://a.com",
            vec![
                MockOutcome::Error("timeout".into()),
                MockOutcome::Content(MockExtractor::content("A", 10)),
            ],
        );

        assert!(extractor.extract("https://a.com").await.is_err());
        assert_eq!(extractor.extract("https://a.com").await.unwrap().body_chars(), 10);
        assert_eq!(extractor.extract("https://a.com").await.unwrap().body_chars(), 10);
        assert_eq!(extractor.attempts("https://a.com"), 3);
        assert!(extractor.extract("https://unknown.com").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_searcher_defaults_to_empty() {
        let searcher = MockSearcher::new().with_links("q", &["https://a.com", "https://b.com"]);

        let hits = searcher.search("q").await.unwrap();
        assert_eq!(hits.links().collect::<Vec<_>>(), vec!["https://a.com", "https://b.com"]);
        assert!(searcher.search("other").await.unwrap().items.is_empty());
        assert_eq!(searcher.queries(), vec!["q", "other"]);
    }

    #[tokio::test]
    async fn test_mock_ai_records_calls() {
        let ai = MockAI::new().with_summary_error("Broken", "model overloaded");

        let plan = ai.plan("rust").await.unwrap();
        assert_eq!(plan.queries, vec!["rust"]);
        assert_eq!(ai.summarize("Fine", "body").await.unwrap(), "Summary of Fine");
        assert!(ai.summarize("Broken", "body").await.is_err());

        assert_eq!(ai.summarize_calls(), 2);
        assert_eq!(
            ai.calls()[0],
            MockAICall::Plan {
                topic: "rust".into()
            }
        );
    }
}
