//! AI implementations for the research library.
//!
//! This module provides the reference implementation of the `AI` trait.
//! Users can use it directly or implement their own.

pub mod prompts;
pub mod schema;

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAI;

use std::time::Duration;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Default model for query planning.
pub const DEFAULT_PLANNER_MODEL: &str = "gemini-2.0-flash";

/// Default model for summarization.
pub const DEFAULT_SUMMARIZER_MODEL: &str = "gemini-1.5-flash";

/// Per-request timeout for model calls unless overridden.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(60);
