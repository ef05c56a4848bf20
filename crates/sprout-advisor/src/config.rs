//! Advisor backend configuration.
//!
//! Loaded from environment variables so API keys never live in the YAML
//! config. All four backend variables are required; when any is missing
//! the engine runs with the offline advisor instead.

use std::path::PathBuf;

/// Errors that can occur when reading the advisor configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorConfigError {
    /// A required variable is not set.
    #[error("missing required env var {name}")]
    Missing {
        /// The variable name.
        name: &'static str,
    },

    /// `ADVISOR_BACKEND` names a backend we do not speak.
    #[error("unknown advisor backend: {value}")]
    UnknownBackend {
        /// The rejected value.
        value: String,
    },
}

/// Complete advisor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorSettings {
    /// The LLM backend to call.
    pub backend: LlmBackendConfig,
    /// Directory with prompt template overrides, if any.
    pub templates_dir: Option<PathBuf>,
}

/// Configuration for a single LLM backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmBackendConfig {
    /// The backend type.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.openai.com/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible chat completions (`OpenAI`, `DeepSeek`, Ollama).
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
    /// Google Gemini `generateContent` API.
    Gemini,
}

impl BackendType {
    /// Parse a backend name, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, AdvisorConfigError> {
        match value.trim().to_lowercase().as_str() {
            "openai" | "deepseek" | "ollama" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "gemini" | "google" => Ok(Self::Gemini),
            _ => Err(AdvisorConfigError::UnknownBackend {
                value: value.to_owned(),
            }),
        }
    }
}

impl AdvisorSettings {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `ADVISOR_BACKEND` -- `openai`, `anthropic`, or `gemini`
    /// - `ADVISOR_API_URL` -- API base URL
    /// - `ADVISOR_API_KEY` -- API key
    /// - `ADVISOR_MODEL` -- model name
    ///
    /// Optional variables:
    /// - `ADVISOR_TEMPLATES_DIR` -- prompt template overrides
    pub fn from_env() -> Result<Self, AdvisorConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AdvisorConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(AdvisorConfigError::Missing { name })
        };

        let backend_type = BackendType::parse(&required("ADVISOR_BACKEND")?)?;
        let api_url = required("ADVISOR_API_URL")?;
        let api_key = required("ADVISOR_API_KEY")?;
        let model = required("ADVISOR_MODEL")?;
        let templates_dir = lookup("ADVISOR_TEMPLATES_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            backend: LlmBackendConfig {
                backend_type,
                api_url: api_url.trim_end_matches('/').to_owned(),
                api_key,
                model,
            },
            templates_dir,
        })
    }
}
