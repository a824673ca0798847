//! Topic Research Pipeline Library
//!
//! Turns a free-text research topic into a set of summarized web articles.
//! A language model plans a handful of search queries, a web search
//! provider turns them into candidate URLs, each page is fetched and
//! cleaned (with a paragraph-scraping fallback and a bounded retry policy),
//! and the model summarizes whatever was extracted.
//!
//! Progress is reported as a stream of cumulative snapshots: each one
//! carries everything processed so far, so a consumer can render any
//! snapshot on its own.
//!
//! # Usage
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use research::{ResearchPipeline, ResearchRequest};
//! use research::testing::{MockAI, MockExtractor, MockSearcher};
//!
//! let pipeline = ResearchPipeline::new(MockAI::new(), MockSearcher::new(), MockExtractor::new());
//! let mut run = pipeline.run(ResearchRequest::new("perovskite solar cells"));
//!
//! while let Some(snapshot) = run.next().await {
//!     let snapshot = snapshot?;
//!     println!("{}: {}/{}", snapshot.status, snapshot.successful_articles, snapshot.total_articles);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (AI, WebSearcher, ContentExtractor)
//! - [`types`] - Requests, plans, article outcomes, snapshots, config
//! - [`pipeline`] - Orchestrator, retry policy, progress accounting
//! - [`ai`] - OpenAI-compatible model client, prompts, structured output schemas
//! - [`searchers`] - Google Custom Search client
//! - [`extractors`] - HTTP page extractor and HTML strategies
//! - [`settings`] - Environment-backed startup configuration
//! - [`security`] - API key handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod extractors;
pub mod pipeline;
pub mod searchers;
pub mod security;
pub mod settings;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    AIError, ConfigError, ExtractError, ResearchError, Result, SearchError,
};
pub use traits::{
    ai::AI,
    extractor::ContentExtractor,
    searcher::{SearchItem, SearchResponse, WebSearcher},
};
pub use types::{
    article::{ArticleResult, ExtractedContent, ExtractionMethod},
    config::{ExtractorConfig, PipelineConfig},
    request::{QueryPlan, ResearchRequest},
    snapshot::{ProgressSnapshot, RunStatus},
};

pub use pipeline::{scrape_with_retries, ResearchPipeline, SnapshotStream, FAILED_TO_SCRAPE};

pub use extractors::WebExtractor;
pub use searchers::GoogleSearch;
pub use security::ApiKey;
pub use settings::Settings;

#[cfg(feature = "openai")]
pub use ai::OpenAI;
