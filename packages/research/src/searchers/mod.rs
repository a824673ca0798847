//! Web searcher implementations.

mod google;

pub use google::{GoogleSearch, DEFAULT_SEARCH_TIMEOUT, DEFAULT_SEARCH_URL, RESULTS_PER_QUERY};

// Re-export from traits for convenience
pub use crate::traits::searcher::{SearchItem, SearchResponse, WebSearcher};
