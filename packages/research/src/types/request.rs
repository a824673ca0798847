//! Run inputs: the user's topic and the query plan derived from it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Immutable research request holding the user's topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRequest {
    topic: String,
}

impl ResearchRequest {
    /// Create a request for a topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    /// The topic as the user typed it.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl From<&str> for ResearchRequest {
    fn from(topic: &str) -> Self {
        Self::new(topic)
    }
}

/// Ordered search queries plus the model's rationale.
///
/// Insertion order is priority order. Produced once per run and never
/// regenerated. Doubles as the planner's structured-output schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryPlan {
    /// Search queries, highest priority first
    pub queries: Vec<String>,

    /// Free-text rationale for the chosen queries
    pub thought: String,
}

impl QueryPlan {
    /// Create a plan from queries and a rationale.
    pub fn new(
        queries: impl IntoIterator<Item = impl Into<String>>,
        thought: impl Into<String>,
    ) -> Self {
        Self {
            queries: queries.into_iter().map(Into::into).collect(),
            thought: thought.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }
}
