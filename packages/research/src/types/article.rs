//! Per-URL outcomes.

use serde::{Deserialize, Serialize};

/// Which extraction strategy produced a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Boilerplate-removal heuristic over the main content container
    Article,

    /// Raw paragraph scraping
    Paragraphs,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Article => f.write_str("article"),
            Self::Paragraphs => f.write_str("paragraphs"),
        }
    }
}

/// Readable text pulled from a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub title: String,
    pub body: String,
    pub method: ExtractionMethod,
}

impl ExtractedContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>, method: ExtractionMethod) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            method,
        }
    }

    /// Body length in characters (not bytes).
    pub fn body_chars(&self) -> usize {
        self.body.chars().count()
    }
}

/// Outcome of processing one URL.
///
/// The URL is the identity key: a run holds at most one result per URL
/// it targeted (a URL listed twice by search is processed twice and so
/// appears twice, once per position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArticleResult {
    /// Extraction succeeded. Exactly one of `summary` and `error` is set:
    /// a summarizer failure keeps the extracted content and records why.
    Success {
        url: String,
        title: String,
        body: String,
        method: ExtractionMethod,
        summary: Option<String>,
        error: Option<String>,
    },

    /// Extraction never produced acceptable content.
    Failure { url: String, reason: String },
}

impl ArticleResult {
    /// Extracted and summarized.
    pub fn summarized(url: impl Into<String>, content: ExtractedContent, summary: String) -> Self {
        Self::Success {
            url: url.into(),
            title: content.title,
            body: content.body,
            method: content.method,
            summary: Some(summary),
            error: None,
        }
    }

    /// Extracted, but the summarizer failed.
    pub fn unsummarized(url: impl Into<String>, content: ExtractedContent, error: String) -> Self {
        Self::Success {
            url: url.into(),
            title: content.title,
            body: content.body,
            method: content.method,
            summary: None,
            error: Some(error),
        }
    }

    /// Extraction exhausted.
    pub fn failure(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failure {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Success { title, .. } => Some(title),
            Self::Failure { .. } => None,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::Success { summary, .. } => summary.as_deref(),
            Self::Failure { .. } => None,
        }
    }

    /// The error string, if this article counts as failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { error, .. } => error.as_deref(),
            Self::Failure { reason, .. } => Some(reason),
        }
    }

    /// Successful means summarized with no error.
    pub fn is_success(&self) -> bool {
        self.error().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> ExtractedContent {
        ExtractedContent::new("Title", "Body text", ExtractionMethod::Article)
    }

    #[test]
    fn test_summarizer_failure_counts_as_failed_but_keeps_content() {
        let article = ArticleResult::unsummarized("https://a.com", content(), "model down".into());
        assert!(!article.is_success());
        assert_eq!(article.error(), Some("model down"));
        assert_eq!(article.title(), Some("Title"));
        assert_eq!(article.summary(), None);
    }

    #[test]
    fn test_failure_reason_is_error() {
        let article = ArticleResult::failure("https://b.com", "Failed to scrape");
        assert_eq!(article.url(), "https://b.com");
        assert_eq!(article.error(), Some("Failed to scrape"));
        assert_eq!(article.title(), None);
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let article = ArticleResult::summarized("https://a.com", content(), "Short.".into());
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["method"], "article");
        assert_eq!(json["summary"], "Short.");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_body_chars_counts_characters() {
        let content = ExtractedContent::new("t", "héllo", ExtractionMethod::Paragraphs);
        assert_eq!(content.body_chars(), 5);
    }
}
