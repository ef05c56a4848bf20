//! The advisory collaborator: daily events, planting tips, and chat.
//!
//! The game asks an [`Advisor`] for three things and is prepared for every
//! request to fail. Failures never leave this module as errors: the
//! `*_or_*` helpers bound each call with a deadline, log the problem, and
//! substitute the fallback (no event, a canned tip, a canned chat reply).
//!
//! [`StubAdvisor`] always fails, which makes the whole game run on its
//! deterministic fallbacks. The live implementation lives in the
//! `sprout-advisor` crate.

use std::future::Future;
use std::time::Duration;

use sprout_types::{DailyEvent, GameState, PlantKind};
use tracing::warn;

/// Chat reply used when the advisor cannot answer.
pub const CHAT_FALLBACK: &str = "I'm having trouble connecting to the satellite. Try again later!";

/// Tip used when the advisor cannot answer.
pub fn tip_fallback(plant: PlantKind) -> String {
    format!("Great choice! {plant} is fun to grow.")
}

/// Errors an advisor can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorError {
    /// The backend could not be reached or answered with an error status.
    #[error("advisor request failed: {0}")]
    Request(String),

    /// The reply could not be interpreted.
    #[error("advisor reply unusable: {0}")]
    Parse(String),

    /// The prompt could not be built.
    #[error("advisor prompt failed: {0}")]
    Template(String),

    /// The reply did not arrive before the deadline.
    #[error("advisor timed out after {ms}ms")]
    Timeout {
        /// The deadline in milliseconds.
        ms: u64,
    },

    /// No backend is configured.
    #[error("no advisor backend configured")]
    Unavailable,
}

/// A source of daily events, planting tips, and gardening advice.
pub trait Advisor: Send + Sync + 'static {
    /// Produce the event for the day that just began.
    fn daily_event(&self, day: u64) -> impl Future<Output = Result<DailyEvent, AdvisorError>> + Send;

    /// A short tip for growing `plant`.
    fn plant_tip(&self, plant: PlantKind) -> impl Future<Output = Result<String, AdvisorError>> + Send;

    /// Answer a player question in the context of the current state.
    fn chat(
        &self,
        question: &str,
        state: &GameState,
    ) -> impl Future<Output = Result<String, AdvisorError>> + Send;
}

/// An advisor with no backend. Every request fails with
/// [`AdvisorError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StubAdvisor;

impl StubAdvisor {
    /// Create a new stub advisor.
    pub const fn new() -> Self {
        Self
    }
}

impl Advisor for StubAdvisor {
    async fn daily_event(&self, _day: u64) -> Result<DailyEvent, AdvisorError> {
        Err(AdvisorError::Unavailable)
    }

    async fn plant_tip(&self, _plant: PlantKind) -> Result<String, AdvisorError> {
        Err(AdvisorError::Unavailable)
    }

    async fn chat(&self, _question: &str, _state: &GameState) -> Result<String, AdvisorError> {
        Err(AdvisorError::Unavailable)
    }
}

async fn with_deadline<T>(
    deadline: Duration,
    request: impl Future<Output = Result<T, AdvisorError>>,
) -> Result<T, AdvisorError> {
    tokio::time::timeout(deadline, request)
        .await
        .unwrap_or_else(|_elapsed| {
            Err(AdvisorError::Timeout {
                ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
            })
        })
}

/// Fetch the daily event, or `None` on any failure.
pub async fn event_or_none<A: Advisor>(
    advisor: &A,
    day: u64,
    deadline: Duration,
) -> Option<DailyEvent> {
    match with_deadline(deadline, advisor.daily_event(day)).await {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(day, error = %e, "Daily event unavailable, using fallback weather");
            None
        }
    }
}

/// Fetch a planting tip, or the canned encouragement on any failure.
pub async fn tip_or_fallback<A: Advisor>(advisor: &A, plant: PlantKind, deadline: Duration) -> String {
    match with_deadline(deadline, advisor.plant_tip(plant)).await {
        Ok(tip) => tip,
        Err(e) => {
            warn!(%plant, error = %e, "Planting tip unavailable, using fallback");
            tip_fallback(plant)
        }
    }
}

/// Fetch a chat answer, or the canned "can't connect" reply on any failure.
pub async fn chat_or_fallback<A: Advisor>(
    advisor: &A,
    question: &str,
    state: &GameState,
    deadline: Duration,
) -> String {
    match with_deadline(deadline, advisor.chat(question, state)).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!(error = %e, "Chat answer unavailable, using fallback");
            CHAT_FALLBACK.to_owned()
        }
    }
}
