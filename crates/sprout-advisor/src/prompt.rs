//! Prompt template loading and rendering via `minijinja`.
//!
//! Every prompt ships with a built-in default so the advisor works out of
//! the box. Operators can override any of them by dropping a file with the
//! same name into the templates directory:
//!
//! | File        | Used for                                  |
//! |-------------|-------------------------------------------|
//! | `system.j2` | System message shared by all requests     |
//! | `event.j2`  | Daily event generation (JSON reply)       |
//! | `tip.j2`    | Short planting tip                        |
//! | `chat.j2`   | Player question with game context         |

use std::path::Path;

use minijinja::{Environment, context};
use sprout_core::AdvisorError;
use sprout_types::{GameState, PlantKind};
use tracing::debug;

const DEFAULT_SYSTEM: &str = "\
You are Sprout, an expert urban farming agronomist advising the player of a \
rooftop garden simulation game.";

const DEFAULT_EVENT: &str = "\
Invent one random daily event for day {{ day }} of an urban farming game.
It should be realistic for a city rooftop garden: pests, a sudden change in
the weather, a market swing, a gift from a neighbor.

Reply with a single JSON object and nothing else:
{
  \"title\": \"Short Title\",
  \"description\": \"One sentence description.\",
  \"effectType\": \"water\" | \"money\" | \"health\" | \"growth\" | \"none\",
  \"effectValue\": <positive or negative integer>,
  \"weatherChange\": \"Sunny\" | \"Rainy\" | \"Cloudy\" | \"Heatwave\" | null
}";

const DEFAULT_TIP: &str = "\
Give one quick tip for growing {{ plant }} in an urban environment.
Keep it under 20 words.";

const DEFAULT_CHAT: &str = "\
Game context: day {{ day }}, weather {{ weather }}, money ${{ money }}, water {{ water }}.

The player asks: \"{{ question }}\"

Answer helpfully and encouragingly in at most two sentences, tailored to the
game context.";

/// Template names paired with their built-in defaults.
const TEMPLATES: [(&str, &str); 4] = [
    ("system", DEFAULT_SYSTEM),
    ("event", DEFAULT_EVENT),
    ("tip", DEFAULT_TIP),
    ("chat", DEFAULT_CHAT),
];

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System message.
    pub system: String,
    /// User message.
    pub user: String,
}

/// Renders advisor prompts.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// Create an engine with the built-in templates only.
    pub fn builtin() -> Result<Self, AdvisorError> {
        Self::new(None)
    }

    /// Create an engine, overriding built-ins with files from `templates_dir`.
    ///
    /// Missing files fall back to the built-in template; unreadable or
    /// syntactically broken files are errors.
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, AdvisorError> {
        let mut env = Environment::new();
        for (name, default) in TEMPLATES {
            let source = templates_dir
                .map(|dir| load_override(dir, name))
                .transpose()?
                .flatten()
                .unwrap_or_else(|| default.to_owned());
            env.add_template_owned(name, source).map_err(|e| {
                AdvisorError::Template(format!("failed to add {name} template: {e}"))
            })?;
        }
        Ok(Self { env })
    }

    /// Prompt for the daily event of `day`.
    pub fn event(&self, day: u64) -> Result<RenderedPrompt, AdvisorError> {
        self.render("event", context! { day => day })
    }

    /// Prompt for a planting tip.
    pub fn tip(&self, plant: PlantKind) -> Result<RenderedPrompt, AdvisorError> {
        self.render("tip", context! { plant => plant.name() })
    }

    /// Prompt for a chat answer in the context of `state`.
    pub fn chat(&self, question: &str, state: &GameState) -> Result<RenderedPrompt, AdvisorError> {
        self.render(
            "chat",
            context! {
                question => question,
                day => state.day,
                weather => state.weather.name(),
                money => state.money,
                water => state.water_supply,
            },
        )
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<RenderedPrompt, AdvisorError> {
        let system = self.render_one("system", &ctx)?;
        let user = self.render_one(name, &ctx)?;
        Ok(RenderedPrompt { system, user })
    }

    fn render_one(&self, name: &str, ctx: &minijinja::Value) -> Result<String, AdvisorError> {
        self.env
            .get_template(name)
            .map_err(|e| AdvisorError::Template(format!("missing {name} template: {e}")))?
            .render(ctx)
            .map_err(|e| AdvisorError::Template(format!("{name} render failed: {e}")))
    }
}

/// Read `{dir}/{name}.j2` if it exists.
fn load_override(dir: &Path, name: &str) -> Result<Option<String>, AdvisorError> {
    let path = dir.join(format!("{name}.j2"));
    if !path.exists() {
        return Ok(None);
    }
    debug!(path = %path.display(), "Loading prompt template override");
    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| AdvisorError::Template(format!("failed to read {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use sprout_types::Weather;

    use super::*;

    fn scratch_dir(label: &str) -> std::path::PathBuf {
        let unique = format!(
            "sprout_test_templates_{label}_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn builtin_event_prompt_names_the_day_and_shape() {
        let engine = PromptEngine::builtin();
        assert!(engine.is_ok());
        let Ok(engine) = engine else { return };
        let prompt = engine.event(12);
        assert!(prompt.is_ok());
        let prompt = prompt.unwrap_or_else(|_| RenderedPrompt {
            system: String::new(),
            user: String::new(),
        });
        assert!(prompt.system.contains("Sprout"));
        assert!(prompt.user.contains("day 12"));
        assert!(prompt.user.contains("effectType"));
        assert!(prompt.user.contains("weatherChange"));
    }

    #[test]
    fn tip_prompt_names_the_plant() {
        let engine = PromptEngine::builtin();
        let user = engine
            .and_then(|e| e.tip(PlantKind::Strawberry))
            .map(|p| p.user)
            .unwrap_or_default();
        assert!(user.contains("Strawberry"));
        assert!(user.contains("under 20 words"));
    }

    #[test]
    fn chat_prompt_carries_game_context() {
        let state = GameState {
            day: 7,
            money: 42,
            water_supply: 130,
            slots: Vec::new(),
            logs: Vec::new(),
            weather: Weather::Heatwave,
        };
        let user = PromptEngine::builtin()
            .and_then(|e| e.chat("Should I water?", &state))
            .map(|p| p.user)
            .unwrap_or_default();
        assert!(user.contains("day 7"));
        assert!(user.contains("Heatwave"));
        assert!(user.contains("$42"));
        assert!(user.contains("water 130"));
        assert!(user.contains("Should I water?"));
    }

    #[test]
    fn directory_overrides_individual_templates() {
        let dir = scratch_dir("override");
        std::fs::write(dir.join("tip.j2"), "Tip please: {{ plant }}!").ok();

        let engine = PromptEngine::new(Some(&dir));
        assert!(engine.is_ok());
        let Ok(engine) = engine else { return };
        let tip = engine.tip(PlantKind::Basil).map(|p| p.user);
        assert_eq!(tip.as_deref(), Ok("Tip please: Basil!"));
        // Untouched templates keep their defaults.
        let event = engine.event(3).map(|p| p.user).unwrap_or_default();
        assert!(event.contains("day 3"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn broken_override_is_a_template_error() {
        let dir = scratch_dir("broken");
        std::fs::write(dir.join("event.j2"), "{% if day %}unterminated").ok();
        let engine = PromptEngine::new(Some(&dir));
        assert!(matches!(engine, Err(AdvisorError::Template(_))));
        std::fs::remove_dir_all(&dir).ok();
    }
}
