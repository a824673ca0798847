//! Per-run accumulator that stamps out snapshots.

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use uuid::Uuid;

use crate::types::article::ArticleResult;
use crate::types::request::QueryPlan;
use crate::types::snapshot::{ProgressSnapshot, RunStatus};

/// Mutable state of one run. Only the pipeline driving the run touches it;
/// consumers only ever see the snapshots it produces.
#[derive(Debug)]
pub struct RunState {
    run_id: Uuid,
    topic: String,
    started: Instant,
    started_at: DateTime<Utc>,
    total: usize,
    articles: Vec<ArticleResult>,
}

impl RunState {
    /// Start the clock for a run.
    pub fn start(topic: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            topic: topic.into(),
            started: Instant::now(),
            started_at: Utc::now(),
            total: 0,
            articles: Vec::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Fix the number of URLs targeted for processing.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Append a concluded article. Results are never replaced.
    pub fn push(&mut self, article: ArticleResult) {
        self.articles.push(article);
    }

    pub fn processed(&self) -> usize {
        self.articles.len()
    }

    /// Snapshot the run as of now.
    pub fn snapshot(&self, status: RunStatus, plan: Option<QueryPlan>) -> ProgressSnapshot {
        let successful = self.articles.iter().filter(|a| a.is_success()).count();

        ProgressSnapshot {
            run_id: self.run_id,
            query: self.topic.clone(),
            status,
            articles: self.articles.clone(),
            total_articles: self.total,
            successful_articles: successful,
            failed_articles: self.articles.len() - successful,
            duration: self.started.elapsed(),
            started_at: self.started_at,
            plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::article::{ExtractedContent, ExtractionMethod};
    use std::time::Duration;

    fn content() -> ExtractedContent {
        ExtractedContent::new("T", "B", ExtractionMethod::Article)
    }

    #[test]
    fn test_counts_follow_articles() {
        let mut run = RunState::start("topic");
        run.set_total(3);
        run.push(ArticleResult::summarized("https://a.com", content(), "S".into()));
        run.push(ArticleResult::unsummarized("https://b.com", content(), "E".into()));
        run.push(ArticleResult::failure("https://c.com", "Failed to scrape"));

        let snapshot = run.snapshot(RunStatus::Completed, None);
        assert_eq!(snapshot.total_articles, 3);
        assert_eq!(snapshot.successful_articles, 1);
        assert_eq!(snapshot.failed_articles, 2);
        assert_eq!(snapshot.query, "topic");
        assert_eq!(snapshot.run_id, run.run_id());
    }

    #[test]
    fn test_snapshots_are_detached_from_later_pushes() {
        let mut run = RunState::start("topic");
        let before = run.snapshot(RunStatus::QueriesGenerated, Some(QueryPlan::default()));
        run.push(ArticleResult::failure("https://a.com", "Failed to scrape"));

        assert!(before.articles.is_empty());
        assert!(before.plan.is_some());
        assert_eq!(run.snapshot(RunStatus::Completed, None).articles.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_measures_since_start() {
        let run = RunState::start("topic");
        tokio::time::sleep(Duration::from_secs(2)).await;

        let snapshot = run.snapshot(RunStatus::Completed, None);
        assert!(snapshot.duration >= Duration::from_secs(2));
    }
}
