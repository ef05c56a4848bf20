//! LLM reply parsing into daily events and advice text.
//!
//! Models wrap JSON in markdown fences, leave trailing commas, and invent
//! enum values. The event parser tries several recovery strategies for
//! the syntax, then validates the content strictly: an event the game
//! cannot apply exactly is rejected and the day takes the fallback path.

use sprout_core::AdvisorError;
use sprout_types::{DailyEvent, EffectType, Weather};

/// Intermediate struct for the model's raw JSON reply.
///
/// Fields are kept loose here and validated in [`convert_raw_event`].
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    effect_type: Option<String>,
    #[serde(default)]
    effect_value: serde_json::Value,
    #[serde(default)]
    weather_change: Option<String>,
}

/// Parse a model reply into a [`DailyEvent`].
///
/// Recovery strategies, in order:
/// 1. Direct `serde_json` deserialization
/// 2. Extract JSON from a markdown code block
/// 3. Strip trailing commas and retry
/// 4. Code block and trailing commas together
pub fn parse_daily_event(raw: &str) -> Result<DailyEvent, AdvisorError> {
    let trimmed = raw.trim();

    // Strategy 1: direct parse
    if let Ok(parsed) = serde_json::from_str::<RawEvent>(trimmed) {
        return convert_raw_event(parsed);
    }

    // Strategy 2: extract from markdown code block
    if let Some(json_str) = extract_json_from_codeblock(trimmed)
        && let Ok(parsed) = serde_json::from_str::<RawEvent>(json_str)
    {
        return convert_raw_event(parsed);
    }

    // Strategy 3: strip trailing commas and retry
    let cleaned = strip_trailing_commas(trimmed);
    if let Ok(parsed) = serde_json::from_str::<RawEvent>(&cleaned) {
        return convert_raw_event(parsed);
    }

    // Strategy 4: extract from code block then strip commas
    if let Some(json_str) = extract_json_from_codeblock(trimmed) {
        let cleaned_inner = strip_trailing_commas(json_str);
        if let Ok(parsed) = serde_json::from_str::<RawEvent>(&cleaned_inner) {
            return convert_raw_event(parsed);
        }
    }

    Err(AdvisorError::Parse(format!(
        "all parse strategies failed for: {trimmed}"
    )))
}

/// Clean up a free-text advice reply. Empty replies are failures.
pub fn parse_advice(raw: &str) -> Result<String, AdvisorError> {
    let text = raw.trim().trim_matches('"').trim();
    if text.is_empty() {
        return Err(AdvisorError::Parse("empty advice reply".to_owned()));
    }
    Ok(text.to_owned())
}

/// Validate a raw event into one the game can apply.
fn convert_raw_event(raw: RawEvent) -> Result<DailyEvent, AdvisorError> {
    let title = raw
        .title
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AdvisorError::Parse("event has no title".to_owned()))?;
    let description = raw.description.map(|d| d.trim().to_owned()).unwrap_or_default();

    let effect_type = raw
        .effect_type
        .as_deref()
        .map_or(Ok(EffectType::None), parse_effect_type)?;
    let effect_value = match &raw.effect_value {
        serde_json::Value::Null => 0,
        value => value.as_i64().ok_or_else(|| {
            AdvisorError::Parse(format!("effectValue is not an integer: {value}"))
        })?,
    };
    let weather_change = raw
        .weather_change
        .as_deref()
        .map(parse_weather)
        .transpose()?
        .flatten();

    Ok(DailyEvent {
        title,
        description,
        effect_type,
        effect_value,
        weather_change,
    })
}

fn parse_effect_type(s: &str) -> Result<EffectType, AdvisorError> {
    match s.trim().to_lowercase().as_str() {
        "water" => Ok(EffectType::Water),
        "money" => Ok(EffectType::Money),
        "health" => Ok(EffectType::Health),
        "growth" => Ok(EffectType::Growth),
        "none" | "" => Ok(EffectType::None),
        other => Err(AdvisorError::Parse(format!("unknown effectType: {other}"))),
    }
}

/// `Ok(None)` for the spellings models use to mean "no change".
fn parse_weather(s: &str) -> Result<Option<Weather>, AdvisorError> {
    match s.trim().to_lowercase().as_str() {
        "sunny" => Ok(Some(Weather::Sunny)),
        "rainy" => Ok(Some(Weather::Rainy)),
        "cloudy" => Ok(Some(Weather::Cloudy)),
        "heatwave" => Ok(Some(Weather::Heatwave)),
        "" | "null" | "none" => Ok(None),
        other => Err(AdvisorError::Parse(format!("unknown weatherChange: {other}"))),
    }
}

/// Extract JSON from a markdown code block (```json ... ``` or ``` ... ```).
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let fence = text.find("```")?;
    let after_fence = fence.checked_add(3)?;
    let rest = text.get(after_fence..)?;
    // Skip the info string (e.g. `json`) up to the end of the line.
    let body_start = rest.find('\n').and_then(|nl| nl.checked_add(1)).unwrap_or(0);
    let body = rest.get(body_start..)?;
    let end = body.find("```")?;
    body.get(..end).map(str::trim)
}

/// Strip trailing commas before closing braces and brackets.
fn strip_trailing_commas(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ',' {
            let next = chars.clone().find(|n| !n.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        result.push(c);
    }
    result
}
