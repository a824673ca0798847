//! The orchestrator.
//!
//! ```text
//! PLANNING ──► SEARCHING ──► PROCESSING ──► COMPLETE
//!                  │
//!                  └──► NO_RESULTS
//! ```
//!
//! Snapshots are emitted after planning, after every URL, and once at the
//! end. Only a planning failure ends a run with an error; every later
//! failure is recorded in the data and the run carries on.

use async_stream::stream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::progress::RunState;
use super::retry::scrape_with_retries;
use crate::error::{ResearchError, Result};
use crate::traits::{ai::AI, extractor::ContentExtractor, searcher::WebSearcher};
use crate::types::{
    article::ArticleResult,
    config::PipelineConfig,
    request::{QueryPlan, ResearchRequest},
    snapshot::{ProgressSnapshot, RunStatus},
};

/// Failure reason for a URL whose extraction tries ran out.
pub const FAILED_TO_SCRAPE: &str = "Failed to scrape";

/// Stream of snapshots for one run.
pub type SnapshotStream<'a> = Pin<Box<dyn Stream<Item = Result<ProgressSnapshot>> + Send + 'a>>;

/// Sequences planning, search, extraction, and summarization for a topic.
///
/// Collaborators are injected, so any model, search provider, or extractor
/// can be swapped in without touching the pipeline logic.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = ResearchPipeline::new(ai, searcher, extractor);
/// let mut run = pipeline.run(ResearchRequest::new("quantum error correction"));
///
/// while let Some(snapshot) = run.next().await {
///     let snapshot = snapshot?;
///     println!("{} ({:.1}s)", snapshot.status, snapshot.duration.as_secs_f64());
/// }
/// ```
pub struct ResearchPipeline<A: AI, S: WebSearcher, E: ContentExtractor> {
    ai: A,
    searcher: S,
    extractor: E,
    config: PipelineConfig,
}

impl<A: AI, S: WebSearcher, E: ContentExtractor> ResearchPipeline<A, S, E> {
    /// Create a pipeline with the default policy (5 articles, 3 tries, 1.5s apart).
    pub fn new(ai: A, searcher: S, extractor: E) -> Self {
        Self::with_config(ai, searcher, extractor, PipelineConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(ai: A, searcher: S, extractor: E, config: PipelineConfig) -> Self {
        Self {
            ai,
            searcher,
            extractor,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline for a request.
    ///
    /// Lazy: nothing happens until the stream is polled. Each call starts
    /// an independent run. Dropping the stream abandons the run.
    pub fn run(&self, request: ResearchRequest) -> SnapshotStream<'_> {
        self.run_with_cancel(request, CancellationToken::new())
    }

    /// Like [`run`](Self::run), but stops without a final snapshot once
    /// `cancel` fires, including in the middle of a URL's retries.
    pub fn run_with_cancel(
        &self,
        request: ResearchRequest,
        cancel: CancellationToken,
    ) -> SnapshotStream<'_> {
        Box::pin(stream! {
            let mut run = RunState::start(request.topic());
            info!(run_id = %run.run_id(), topic = %request.topic(), "Planning search queries");

            let plan = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(run_id = %run.run_id(), "Run cancelled during planning");
                    return;
                }
                plan = self.ai.plan(request.topic()) => plan,
            };
            let plan = match plan {
                Ok(plan) => plan,
                Err(e) => {
                    warn!(run_id = %run.run_id(), error = %e, "Query planning failed");
                    yield Err(ResearchError::Planning(e));
                    return;
                }
            };
            debug!(run_id = %run.run_id(), queries = ?plan.queries, thought = %plan.thought, "Query plan");

            yield Ok(run.snapshot(RunStatus::QueriesGenerated, Some(plan.clone())));

            let urls = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(run_id = %run.run_id(), "Run cancelled during search");
                    return;
                }
                urls = self.discover_urls(&plan) => urls,
            };

            if urls.is_empty() {
                warn!(run_id = %run.run_id(), "No URLs found");
                yield Ok(run.snapshot(RunStatus::NoResults, None));
                return;
            }

            let targets: Vec<String> = urls.into_iter().take(self.config.max_articles).collect();
            run.set_total(targets.len());
            info!(run_id = %run.run_id(), count = targets.len(), "Processing URLs");

            for url in &targets {
                let article = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        info!(run_id = %run.run_id(), url = %url, "Run cancelled while processing");
                        return;
                    }
                    article = self.process_article(url) => article,
                };
                run.push(article);

                let status = RunStatus::Processed {
                    done: run.processed(),
                    total: run.total(),
                };
                info!(run_id = %run.run_id(), status = %status, "Progress");
                yield Ok(run.snapshot(status, None));
            }

            info!(run_id = %run.run_id(), "Research completed");
            yield Ok(run.snapshot(RunStatus::Completed, None));
        })
    }

    /// Drive a run to the end and return every snapshot.
    ///
    /// Stops at the first error (which can only be a planning failure).
    pub async fn collect(&self, request: ResearchRequest) -> Result<Vec<ProgressSnapshot>> {
        let mut run = self.run(request);
        let mut snapshots = Vec::new();
        while let Some(snapshot) = run.next().await {
            snapshots.push(snapshot?);
        }
        Ok(snapshots)
    }

    /// Search every query in plan order and concatenate the links.
    ///
    /// Duplicates across queries are kept. A failed query contributes
    /// nothing.
    async fn discover_urls(&self, plan: &QueryPlan) -> Vec<String> {
        let mut urls = Vec::new();

        for query in &plan.queries {
            match self.searcher.search(query).await {
                Ok(response) => {
                    if let Some(error) = &response.error {
                        warn!(query = %query, error = %error, "Search returned an error");
                    }
                    let before = urls.len();
                    urls.extend(response.links().map(str::to_string));
                    debug!(query = %query, found = urls.len() - before, "Search results");
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Search failed");
                }
            }
        }

        urls
    }

    /// Extract (with retries) and summarize one URL.
    async fn process_article(&self, url: &str) -> ArticleResult {
        let Some(content) = scrape_with_retries(&self.extractor, url, &self.config).await else {
            return ArticleResult::failure(url, FAILED_TO_SCRAPE);
        };

        match self.ai.summarize(&content.title, &content.body).await {
            Ok(summary) => ArticleResult::summarized(url, content, summary),
            Err(e) => {
                warn!(url = %url, error = %e, "Summarization failed");
                ArticleResult::unsummarized(url, content, e.to_string())
            }
        }
    }
}
