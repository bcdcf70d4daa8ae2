//! LLM Client — the single point of entry for all completion calls in CorpIntel.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! Everything above this module talks to the `CompletionService` trait, so the
//! completion backend can be swapped (or stubbed in tests) without touching callers.
//!
//! Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
pub mod schema;

use prompts::{schema_system_prompt, ANALYST_SYSTEM};
use schema::ResponseSchema;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all completion calls in CorpIntel.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
/// Server-side web search tool used when a request asks for internet context.
const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
const WEB_SEARCH_MAX_USES: u32 = 5;
const BASE_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} attempts")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Completion contract
// ────────────────────────────────────────────────────────────────────────────

/// One completion request: a prompt plus optional internet augmentation and
/// an optional response schema.
#[derive(Debug, Clone, Serialize)]
pub struct InsightRequest {
    pub prompt: String,
    pub add_context_from_internet: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_json_schema: Option<ResponseSchema>,
}

impl InsightRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            add_context_from_internet: false,
            response_json_schema: None,
        }
    }

    pub fn with_internet_context(mut self, enabled: bool) -> Self {
        self.add_context_from_internet = enabled;
        self
    }

    pub fn with_schema(mut self, schema: Option<ResponseSchema>) -> Self {
        self.response_json_schema = schema;
        self
    }
}

/// What a completion returns: free text, or an object shaped by the request's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum InsightResult {
    Text(String),
    Structured(Value),
}

impl InsightResult {
    /// Blank text, `null`, and empty objects/arrays/strings all count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            InsightResult::Text(text) => text.trim().is_empty(),
            InsightResult::Structured(value) => match value {
                Value::Null => true,
                Value::String(s) => s.trim().is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
                Value::Bool(_) | Value::Number(_) => false,
            },
        }
    }
}

/// The external completion capability. Carried in `AppState` as `Arc<dyn CompletionService>`.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &InsightRequest) -> Result<InsightResult, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<AnthropicTool>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    name: &'static str,
    max_uses: u32,
}

impl AnthropicTool {
    fn web_search() -> Self {
        Self {
            tool_type: WEB_SEARCH_TOOL_TYPE,
            name: "web_search",
            max_uses: WEB_SEARCH_MAX_USES,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Joins every text block. Web-search responses split the answer across
    /// several text blocks interleaved with tool results.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Parses the JSON object of a schema-constrained answer. With web search
    /// the model narrates in earlier text blocks, so the last non-blank block is
    /// tried first, then the outermost `{...}` span of all text.
    pub fn json(&self) -> Result<Value, LlmError> {
        let last = self
            .content
            .iter()
            .rev()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .find(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        if let Ok(value) = serde_json::from_str(strip_json_fences(last)) {
            return Ok(value);
        }

        let text = self.text().ok_or(LlmError::EmptyContent)?;
        Ok(serde_json::from_str(outer_json_object(&text))?)
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Anthropic Messages API client. Production `CompletionService`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    max_attempts: u32,
}

impl LlmClient {
    /// `max_attempts` of 1 disables retries entirely.
    pub fn new(api_key: String, timeout: Duration, max_attempts: u32) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff,
    /// up to the configured number of attempts.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        web_search: bool,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
            tools: if web_search {
                vec![AnthropicTool::web_search()]
            } else {
                Vec::new()
            },
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}, web_search={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens, web_search
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.max_attempts,
        }))
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, request: &InsightRequest) -> Result<InsightResult, LlmError> {
        let system = match &request.response_json_schema {
            Some(schema) => schema_system_prompt(schema)?,
            None => ANALYST_SYSTEM.to_string(),
        };

        let response = self
            .call(&request.prompt, &system, request.add_context_from_internet)
            .await?;
        match request.response_json_schema {
            Some(_) => Ok(InsightResult::Structured(response.json()?)),
            None => {
                let text = response.text().ok_or(LlmError::EmptyContent)?;
                Ok(InsightResult::Text(text.trim().to_string()))
            }
        }
    }
}

/// Exponential backoff before retry `attempt` (1-based): 1s, 2s, 4s, ...
/// capped at `MAX_BACKOFF`.
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u64
        .checked_shl(attempt.saturating_sub(1))
        .unwrap_or(u64::MAX);
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor)).min(MAX_BACKOFF)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match stripped {
        Some(inner) => {
            let inner = inner.trim_start();
            inner
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(inner)
        }
        None => text,
    }
}

/// Slice from the first `{` to the last `}`; the whole text when there is none.
fn outer_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}
