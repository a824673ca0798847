//! Content extractor trait.
//!
//! Given a URL, return readable text. Implementations must not retry
//! internally; the pipeline owns the retry policy.

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::article::ExtractedContent;

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Fetch a page and extract its title and body.
    async fn extract(&self, url: &str) -> ExtractResult<ExtractedContent>;

    /// Short name for logging.
    fn name(&self) -> &str {
        "extractor"
    }
}

#[async_trait]
impl<T: ContentExtractor + ?Sized> ContentExtractor for std::sync::Arc<T> {
    async fn extract(&self, url: &str) -> ExtractResult<ExtractedContent> {
        (**self).extract(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
