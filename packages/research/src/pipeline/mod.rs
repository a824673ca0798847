//! Research pipeline: plan, search, extract with retries, summarize,
//! and stream cumulative progress.

mod progress;
mod research;
mod retry;

pub use progress::RunState;
pub use research::{ResearchPipeline, SnapshotStream, FAILED_TO_SCRAPE};
pub use retry::scrape_with_retries;
