//! Configuration types for the pipeline and the content extractor.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the research pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum URLs processed per run, in discovery order.
    ///
    /// Default: 5.
    pub max_articles: usize,

    /// Extraction tries per URL before giving up.
    ///
    /// Default: 3.
    pub max_attempts: u32,

    /// Wait between extraction tries. Never applied after the last try.
    ///
    /// Default: 1.5 seconds.
    #[serde(with = "duration_secs")]
    pub retry_delay: Duration,

    /// A try is accepted only if the body has MORE characters than this.
    ///
    /// Stricter than the extractor's own floor. Default: 200.
    pub min_body_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_articles: 5,
            max_attempts: 3,
            retry_delay: Duration::from_millis(1500),
            min_body_chars: 200,
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-run article cap.
    pub fn with_max_articles(mut self, max: usize) -> Self {
        self.max_articles = max;
        self
    }

    /// Set extraction tries per URL (at least one).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the wait between tries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the acceptance gate.
    pub fn with_min_body_chars(mut self, chars: usize) -> Self {
        self.min_body_chars = chars;
        self
    }
}

/// Configuration for [`WebExtractor`](crate::extractors::WebExtractor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Primary strategy output must exceed this many characters. Default: 100.
    pub primary_min_chars: usize,

    /// Fallback output must reach this many characters. Default: 100.
    pub fallback_min_chars: usize,

    /// Paragraphs are kept only when their trimmed text exceeds this. Default: 40.
    pub paragraph_min_chars: usize,

    /// Per-request timeout. Default: 10 seconds.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,

    /// User-Agent header sent with page fetches.
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            primary_min_chars: 100,
            fallback_min_chars: 100,
            paragraph_min_chars: 40,
            timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0 (compatible; ResearchBot/1.0)".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Serde helper: `Duration` as fractional seconds.
pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
