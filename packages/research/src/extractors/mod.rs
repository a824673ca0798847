//! Content extractor implementations.
//!
//! - `WebExtractor` - HTTP fetch + article heuristic with paragraph fallback
//! - `html` - the pure extraction strategies it is built on
//! - `MockExtractor` (in `testing`) - for tests

pub mod html;
mod web;

pub use web::WebExtractor;

// Re-export from traits for convenience
pub use crate::traits::extractor::ContentExtractor;
