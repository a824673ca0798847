//! OpenAI-compatible implementation of the AI trait.
//!
//! Talks to any `/chat/completions` endpoint that supports
//! `response_format: json_schema` (OpenAI itself, Gemini's OpenAI
//! compatibility layer, most proxies).
//!
//! # Example
//!
//! ```rust,ignore
//! use research::ai::OpenAI;
//!
//! let ai = OpenAI::new("sk-...")
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_planner_model("gpt-4o-mini");
//! let plan = ai.plan("solid-state batteries").await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::schema::strict_schema;
use super::{
    prompts, DEFAULT_BASE_URL, DEFAULT_MODEL_TIMEOUT, DEFAULT_PLANNER_MODEL,
    DEFAULT_SUMMARIZER_MODEL,
};
use crate::error::{AIError, AIResult};
use crate::security::ApiKey;
use crate::traits::ai::AI;
use crate::types::request::QueryPlan;

/// Summarizer structured output.
#[derive(Debug, Deserialize, JsonSchema)]
struct SummaryOutput {
    summary: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible model client.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    planner_model: String,
    summarizer_model: String,
    timeout: Duration,
}

impl OpenAI {
    /// Create a client with the given API key and default models.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            planner_model: DEFAULT_PLANNER_MODEL.to_string(),
            summarizer_model: DEFAULT_SUMMARIZER_MODEL.to_string(),
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    /// Set a custom base URL (OpenAI, Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the query planning model.
    pub fn with_planner_model(mut self, model: impl Into<String>) -> Self {
        self.planner_model = model.into();
        self
    }

    /// Set the summarization model.
    pub fn with_summarizer_model(mut self, model: impl Into<String>) -> Self {
        self.summarizer_model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a caller-provided HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn planner_model(&self) -> &str {
        &self.planner_model
    }

    pub fn summarizer_model(&self) -> &str {
        &self.summarizer_model
    }

    /// Chat completion constrained to the schema of `T`.
    pub async fn structured<T>(&self, model: &str, system: &str, user: &str) -> AIResult<T>
    where
        T: JsonSchema + DeserializeOwned,
    {
        if self.api_key.is_empty() {
            return Err(AIError::Config("model API key is empty".into()));
        }

        let start = std::time::Instant::now();
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "structured_response",
                    strict: true,
                    schema: strict_schema::<T>(),
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(self.timeout)
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Model request failed");
                AIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Model API error");
            return Err(AIError::Api(format!("{}: {}", status, error_text)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AIError::Api("No response content".into()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            "Structured completion"
        );

        serde_json::from_str(&content)
            .map_err(|e| AIError::Parse(format!("Failed to deserialize response: {}", e)))
    }
}

#[async_trait]
impl AI for OpenAI {
    async fn plan(&self, topic: &str) -> AIResult<QueryPlan> {
        self.structured(
            &self.planner_model,
            prompts::PLANNER_SYSTEM,
            &prompts::planner_user(topic),
        )
        .await
    }

    async fn summarize(&self, title: &str, body: &str) -> AIResult<String> {
        let output: SummaryOutput = self
            .structured(
                &self.summarizer_model,
                prompts::SUMMARIZER_SYSTEM,
                &prompts::summarizer_user(title, body),
            )
            .await?;
        Ok(output.summary)
    }
}
