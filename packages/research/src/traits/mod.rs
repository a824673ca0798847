//! Core trait abstractions for the research pipeline.
//!
//! These are the seams the pipeline is wired through: a model capability,
//! a web searcher, and a content extractor. Production implementations
//! live in `ai`, `searchers`, and `extractors`; mocks live in `testing`.

pub mod ai;
pub mod extractor;
pub mod searcher;
