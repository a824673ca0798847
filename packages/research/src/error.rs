//! Typed errors for the research library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! a fatal planning failure apart from the per-URL and per-query failures
//! the pipeline absorbs into its snapshots.

use thiserror::Error;

/// The only error a research run can yield.
///
/// Everything past planning is captured into the snapshot data model
/// (failed articles, empty search contributions) instead of being raised.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Query planning failed; there is no fallback query source.
    #[error("query planning failed: {0}")]
    Planning(#[source] AIError),
}

/// Errors from content extraction.
///
/// The `Display` text is what ends up as a failure reason, so keep it
/// short and human readable.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("Scraping failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("Scraping failed: HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// URL could not be parsed or uses an unsupported scheme
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Both strategies produced too little text
    #[error("Content too short")]
    ContentTooShort,
}

/// Errors from the web search client.
///
/// A non-success HTTP status is not an error here: the
/// search client reports it as an empty result carrying the body text.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP request failed
    #[error("search request failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body was not the expected JSON
    #[error("search response parse error: {0}")]
    Parse(String),
}

/// Errors from language model calls.
#[derive(Debug, Error)]
pub enum AIError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, empty choices)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (response did not match the requested schema)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty
    #[error("{0} must be set")]
    MissingVar(&'static str),

    /// A variable is present but unusable
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Result type alias for research runs.
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Result type alias for extraction.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for search.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for model calls.
pub type AIResult<T> = std::result::Result<T, AIError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reasons_read_like_messages() {
        assert_eq!(ExtractError::ContentTooShort.to_string(), "Content too short");

        let err = ExtractError::Status {
            status: 404,
            url: "https://example.com/missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "Scraping failed: HTTP 404 for https://example.com/missing"
        );
    }

    #[test]
    fn test_planning_error_wraps_source() {
        let err = ResearchError::Planning(AIError::Api("quota exceeded".into()));
        assert!(err.to_string().contains("quota exceeded"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_names_variable() {
        assert_eq!(
            ConfigError::MissingVar("SEARCH_API_KEY").to_string(),
            "SEARCH_API_KEY must be set"
        );
    }
}
