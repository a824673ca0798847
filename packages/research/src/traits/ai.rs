//! AI trait for the two language model operations the pipeline needs.

use async_trait::async_trait;

use crate::error::AIResult;
use crate::types::request::QueryPlan;

/// Language model capability.
///
/// Implementations wrap a specific provider and own prompting and
/// response parsing. The pipeline only relies on the shapes returned.
#[async_trait]
pub trait AI: Send + Sync {
    /// Propose an ordered list of search queries for a topic.
    ///
    /// The pipeline trusts the result as-is; a failure here is fatal for
    /// the run.
    async fn plan(&self, topic: &str) -> AIResult<QueryPlan>;

    /// Condense an extracted article.
    ///
    /// A failure here is recorded on the article, never raised.
    async fn summarize(&self, title: &str, body: &str) -> AIResult<String>;
}

#[async_trait]
impl<T: AI + ?Sized> AI for std::sync::Arc<T> {
    async fn plan(&self, topic: &str) -> AIResult<QueryPlan> {
        (**self).plan(topic).await
    }

    async fn summarize(&self, title: &str, body: &str) -> AIResult<String> {
        (**self).summarize(title, body).await
    }
}
