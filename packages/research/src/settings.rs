//! Startup settings loaded from the environment.
//!
//! Credentials are validated once here and then passed into each
//! component's constructor. Nothing reads the environment after startup.

use std::env;

use crate::ai::{DEFAULT_BASE_URL, DEFAULT_PLANNER_MODEL, DEFAULT_SUMMARIZER_MODEL};
use crate::error::{ConfigError, ConfigResult};
use crate::searchers::DEFAULT_SEARCH_URL;
use crate::security::ApiKey;

/// Search endpoint credentials.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub api_key: ApiKey,
    pub engine_id: String,
    pub base_url: String,
}

/// Model endpoint credentials and model choices.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub api_key: ApiKey,
    pub base_url: String,
    pub planner_model: String,
    pub summarizer_model: String,
}

/// Everything a run needs from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub search: SearchSettings,
    pub model: ModelSettings,
}

impl Settings {
    /// Load from process environment variables, reading `.env` first if present.
    ///
    /// Required: `SEARCH_API_KEY`, `SEARCH_ENGINE_ID`, and `LLM_API_KEY`
    /// (or `GEMINI_API_KEY`). Everything else has a default.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::MissingVar(name));

        let search = SearchSettings {
            api_key: ApiKey::new(required("SEARCH_API_KEY")?),
            engine_id: required("SEARCH_ENGINE_ID")?,
            base_url: parse_url("SEARCH_BASE_URL", get("SEARCH_BASE_URL"), DEFAULT_SEARCH_URL)?,
        };

        let api_key = get("LLM_API_KEY")
            .or_else(|| get("GEMINI_API_KEY"))
            .ok_or(ConfigError::MissingVar("LLM_API_KEY"))?;

        let model = ModelSettings {
            api_key: ApiKey::new(api_key),
            base_url: parse_url("LLM_BASE_URL", get("LLM_BASE_URL"), DEFAULT_BASE_URL)?,
            planner_model: get("PLANNER_MODEL").unwrap_or_else(|| DEFAULT_PLANNER_MODEL.into()),
            summarizer_model: get("SUMMARIZER_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_MODEL.into()),
        };

        Ok(Self { search, model })
    }
}

fn parse_url(name: &'static str, value: Option<String>, default: &str) -> ConfigResult<String> {
    let value = value.unwrap_or_else(|| default.to_string());
    url::Url::parse(&value).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    Ok(value)
}
