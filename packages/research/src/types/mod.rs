//! Domain data types for a research run.

pub mod article;
pub mod config;
pub mod request;
pub mod snapshot;
