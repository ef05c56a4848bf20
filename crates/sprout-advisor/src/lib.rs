//! LLM-backed advisor for the Urban Sprout garden simulation.
//!
//! Implements the [`Advisor`] contract from `sprout-core` against a hosted
//! model. Each request renders a prompt, calls the configured backend, and
//! parses the reply; any failure is returned as an [`AdvisorError`] and the
//! game substitutes its fallback.
//!
//! # Modules
//!
//! - [`config`] -- Backend settings from environment variables
//! - [`prompt`] -- `minijinja` prompt templates with on-disk overrides
//! - [`llm`] -- `OpenAI`-compatible, Anthropic, and Gemini HTTP backends
//! - [`parse`] -- Reply recovery and validation

pub mod config;
pub mod llm;
pub mod parse;
pub mod prompt;

use sprout_core::{Advisor, AdvisorError, StubAdvisor};
use sprout_types::{DailyEvent, GameState, PlantKind};
use tracing::{debug, info, warn};

pub use config::{AdvisorConfigError, AdvisorSettings, BackendType, LlmBackendConfig};
use llm::{LlmBackend, ReplyFormat, create_backend};
use prompt::PromptEngine;

/// An advisor that asks a hosted LLM.
pub struct LlmAdvisor {
    backend: LlmBackend,
    prompts: PromptEngine,
}

impl LlmAdvisor {
    /// Build an advisor from settings. Fails only when a prompt template
    /// override cannot be loaded.
    pub fn new(settings: &AdvisorSettings) -> Result<Self, AdvisorError> {
        let prompts = PromptEngine::new(settings.templates_dir.as_deref())?;
        Ok(Self {
            backend: create_backend(&settings.backend),
            prompts,
        })
    }

    /// Name of the backend in use, for logging.
    pub const fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl Advisor for LlmAdvisor {
    async fn daily_event(&self, day: u64) -> Result<DailyEvent, AdvisorError> {
        let prompt = self.prompts.event(day)?;
        let raw = self.backend.complete(&prompt, ReplyFormat::Json).await?;
        debug!(day, backend = self.backend.name(), raw_len = raw.len(), "Event reply received");
        parse::parse_daily_event(&raw)
    }

    async fn plant_tip(&self, plant: PlantKind) -> Result<String, AdvisorError> {
        let prompt = self.prompts.tip(plant)?;
        let raw = self.backend.complete(&prompt, ReplyFormat::Text).await?;
        parse::parse_advice(&raw)
    }

    async fn chat(&self, question: &str, state: &GameState) -> Result<String, AdvisorError> {
        let prompt = self.prompts.chat(question, state)?;
        let raw = self.backend.complete(&prompt, ReplyFormat::Text).await?;
        parse::parse_advice(&raw)
    }
}

// ---------------------------------------------------------------------------
// Runtime selection
// ---------------------------------------------------------------------------

/// The advisor the engine runs with: live when configured, offline otherwise.
pub enum GardenAdvisor {
    /// Backed by a hosted LLM.
    Live(Box<LlmAdvisor>),
    /// No backend; every request takes the game's fallback.
    Offline(StubAdvisor),
}

impl GardenAdvisor {
    /// Select an advisor from the process environment.
    ///
    /// Missing or invalid settings are not fatal: the game is fully
    /// playable on its fallbacks, so this logs a warning and goes offline.
    pub fn from_env() -> Self {
        match AdvisorSettings::from_env() {
            Ok(settings) => Self::from_settings(&settings),
            Err(e) => {
                warn!(error = %e, "Advisor not configured, running offline");
                Self::Offline(StubAdvisor::new())
            }
        }
    }

    /// Build a live advisor from explicit settings, or go offline if the
    /// prompt templates cannot be loaded.
    pub fn from_settings(settings: &AdvisorSettings) -> Self {
        match LlmAdvisor::new(settings) {
            Ok(advisor) => {
                info!(
                    backend = advisor.backend_name(),
                    model = %settings.backend.model,
                    "Advisor online"
                );
                Self::Live(Box::new(advisor))
            }
            Err(e) => {
                warn!(error = %e, "Advisor prompts unusable, running offline");
                Self::Offline(StubAdvisor::new())
            }
        }
    }

    /// Whether a live backend is in use.
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

impl Advisor for GardenAdvisor {
    async fn daily_event(&self, day: u64) -> Result<DailyEvent, AdvisorError> {
        match self {
            Self::Live(advisor) => advisor.daily_event(day).await,
            Self::Offline(advisor) => advisor.daily_event(day).await,
        }
    }

    async fn plant_tip(&self, plant: PlantKind) -> Result<String, AdvisorError> {
        match self {
            Self::Live(advisor) => advisor.plant_tip(plant).await,
            Self::Offline(advisor) => advisor.plant_tip(plant).await,
        }
    }

    async fn chat(&self, question: &str, state: &GameState) -> Result<String, AdvisorError> {
        match self {
            Self::Live(advisor) => advisor.chat(question, state).await,
            Self::Offline(advisor) => advisor.chat(question, state).await,
        }
    }
}
