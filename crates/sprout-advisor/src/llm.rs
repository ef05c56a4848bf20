//! LLM backend abstraction and implementations.
//!
//! Enum dispatch over three HTTP APIs: `OpenAI`-compatible chat completions,
//! the Anthropic Messages API, and Google Gemini `generateContent`. The
//! advisor sends a rendered prompt and gets raw reply text back; turning
//! that text into a daily event or advice is the caller's job.

use sprout_core::AdvisorError;

use crate::config::{BackendType, LlmBackendConfig};
use crate::prompt::RenderedPrompt;

/// Token budget per reply. Events and tips are short.
const MAX_TOKENS: u32 = 512;

/// Sampling temperature; events should vary from day to day.
const TEMPERATURE: f64 = 0.9;

/// What kind of reply the prompt expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// A JSON object; backends that support it are asked to enforce it.
    Json,
    /// Free text.
    Text,
}

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// An LLM backend that can process a prompt and return a response.
pub enum LlmBackend {
    /// `OpenAI`-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
    /// Google Gemini API.
    Gemini(GeminiBackend),
}

impl LlmBackend {
    /// Send a prompt to the LLM and return the response text.
    pub async fn complete(
        &self,
        prompt: &RenderedPrompt,
        format: ReplyFormat,
    ) -> Result<String, AdvisorError> {
        match self {
            Self::OpenAi(backend) => backend.complete(prompt, format).await,
            Self::Anthropic(backend) => backend.complete(prompt).await,
            Self::Gemini(backend) => backend.complete(prompt, format).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
            Self::Gemini(_) => "gemini",
        }
    }
}

/// POST a JSON body and return the decoded JSON reply.
async fn post_json(
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
    backend: &str,
) -> Result<serde_json::Value, AdvisorError> {
    let response = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| AdvisorError::Request(format!("{backend} request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("unable to read error body: {e}"));
        return Err(AdvisorError::Request(format!(
            "{backend} returned {status}: {error_body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AdvisorError::Parse(format!("{backend} response parse failed: {e}")))
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for `OpenAI`-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    pub fn new(config: &LlmBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        format: ReplyFormat,
    ) -> Result<String, AdvisorError> {
        let url = format!("{}/chat/completions", self.api_url);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });
        if format == ReplyFormat::Json
            && let Some(fields) = body.as_object_mut()
        {
            fields.insert(
                "response_format".to_owned(),
                serde_json::json!({"type": "json_object"}),
            );
        }

        let request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key));
        let json = post_json(request, &body, "OpenAI").await?;
        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AdvisorError::Parse("OpenAI response missing choices[0].message.content".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API backend
// ---------------------------------------------------------------------------

/// Backend for the Anthropic Messages API.
///
/// - `x-api-key` header instead of `Authorization: Bearer`
/// - system prompt is a top-level field
/// - reply text lives at `content[0].text`
pub struct AnthropicBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicBackend {
    /// Create a new Anthropic Messages API backend.
    pub fn new(config: &LlmBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, AdvisorError> {
        let url = format!("{}/messages", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "system": prompt.system,
            "messages": [
                {"role": "user", "content": prompt.user}
            ]
        });

        let request = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01");
        let json = post_json(request, &body, "Anthropic").await?;
        extract_anthropic_content(&json)
    }
}

/// Extract the text content from an Anthropic Messages API response.
fn extract_anthropic_content(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| AdvisorError::Parse("Anthropic response missing content[0].text".to_owned()))
}

// ---------------------------------------------------------------------------
// Gemini backend
// ---------------------------------------------------------------------------

/// Backend for the Google Gemini `generateContent` API.
///
/// Sends requests to `{api_url}/models/{model}:generateContent` and asks
/// for `application/json` replies when a JSON object is expected.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend.
    pub fn new(config: &LlmBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(
        &self,
        prompt: &RenderedPrompt,
        format: ReplyFormat,
    ) -> Result<String, AdvisorError> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let mime = match format {
            ReplyFormat::Json => "application/json",
            ReplyFormat::Text => "text/plain",
        };
        let body = serde_json::json!({
            "systemInstruction": {"parts": [{"text": prompt.system}]},
            "contents": [
                {"role": "user", "parts": [{"text": prompt.user}]}
            ],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_TOKENS,
                "responseMimeType": mime
            }
        });

        let request = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key);
        let json = post_json(request, &body, "Gemini").await?;
        extract_gemini_content(&json)
    }
}

/// Extract the text content from a Gemini `generateContent` response.
fn extract_gemini_content(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AdvisorError::Parse(
                "Gemini response missing candidates[0].content.parts[0].text".to_owned(),
            )
        })
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create an LLM backend from configuration.
pub fn create_backend(config: &LlmBackendConfig) -> LlmBackend {
    match config.backend_type {
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(config)),
        BackendType::Anthropic => LlmBackend::Anthropic(AnthropicBackend::new(config)),
        BackendType::Gemini => LlmBackend::Gemini(GeminiBackend::new(config)),
    }
}
