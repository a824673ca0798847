//! Progress snapshots emitted by the pipeline.
//!
//! Snapshots are cumulative and immutable. Snapshot *n + 1* holds every
//! article of snapshot *n*, in the same order, plus at most one more.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use super::article::ArticleResult;
use super::config::duration_secs;
use super::request::QueryPlan;

/// Checkpoint a snapshot was taken at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Planning finished; the plan is attached to this snapshot.
    QueriesGenerated,

    /// `done` of `total` targeted URLs have concluded.
    Processed { done: usize, total: usize },

    /// Every targeted URL concluded.
    Completed,

    /// Search produced no URLs at all. Terminal.
    NoResults,
}

impl RunStatus {
    /// True for the last snapshot of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::NoResults)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueriesGenerated => f.write_str("Generated search queries"),
            Self::Processed { done, total } => write!(f, "Processed {}/{}", done, total),
            Self::Completed => f.write_str("Completed"),
            Self::NoResults => f.write_str("Failed: No URLs found"),
        }
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Point-in-time view of a run.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    /// Identifies the run this snapshot belongs to.
    pub run_id: Uuid,

    /// The original topic.
    pub query: String,

    pub status: RunStatus,

    /// Accumulated results, in URL discovery order.
    pub articles: Vec<ArticleResult>,

    /// URLs targeted for processing (after the cap).
    pub total_articles: usize,
    pub successful_articles: usize,
    pub failed_articles: usize,

    /// Wall-clock time since the run started.
    #[serde(rename = "duration_seconds", with = "duration_secs")]
    pub duration: Duration,

    pub started_at: DateTime<Utc>,

    /// Present on the planning snapshot only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<QueryPlan>,
}

impl ProgressSnapshot {
    /// Fraction of targeted articles that have concluded, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total_articles == 0 {
            return 0.0;
        }
        (self.successful_articles + self.failed_articles) as f64 / self.total_articles as f64
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
