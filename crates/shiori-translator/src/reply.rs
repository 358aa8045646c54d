//! Lenient parsing of structured model replies.

use serde::Deserialize;
use shiori_core::types::{Source, Translations};

/// Structured candidate proposed by a remote model
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCandidate {
    pub surface: String,
    pub base_form: String,
    /// Kana as returned by the model; callers normalize the script
    pub hiragana: String,
    pub phonetics: String,
    pub translations: Translations,
    /// Clamped to [0, 1]; 0 when the model gave nothing usable
    pub confidence: f32,
    pub source: Source,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("No JSON object in reply")]
    NotJson,

    #[error("Reply is missing required fields: {0}")]
    MissingFields(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReply {
    surface: String,
    base_form: String,
    #[serde(default)]
    hiragana: Option<String>,
    #[serde(default)]
    katakana: Option<String>,
    #[serde(default)]
    phonetics: Option<String>,
    #[serde(default)]
    translations: Option<ReplyTranslations>,
    #[serde(default)]
    zh: Option<String>,
    #[serde(default)]
    en: Option<String>,
    #[serde(default)]
    ja: Option<String>,
    #[serde(default)]
    confidence: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyTranslations {
    #[serde(default)]
    zh: Option<String>,
    #[serde(default)]
    en: Option<String>,
    #[serde(default)]
    ja: Option<String>,
}

/// Extract the JSON value from a model reply, tolerating fenced code blocks
/// and prose around a single object.
pub fn parse_json_from_text(raw: &str) -> Option<serde_json::Value> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let candidate = fenced_block(raw).unwrap_or(raw).trim();
    if let Ok(value) = serde_json::from_str(candidate) {
        return Some(value);
    }

    let start = candidate.find('{')?;
    let end = candidate.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&candidate[start..=end]).ok()
}

fn fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let rest = &raw[open + 3..];
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let close = rest.find("```")?;
    Some(&rest[..close])
}

/// Turn a model reply into a candidate. Replies that are not an object with
/// `surface` and `baseForm` strings are rejected.
pub fn parse_candidate(raw: &str, source: Source) -> Result<RemoteCandidate, ReplyError> {
    let value = parse_json_from_text(raw)
        .filter(serde_json::Value::is_object)
        .ok_or(ReplyError::NotJson)?;
    let reply: ModelReply = serde_json::from_value(value)?;

    let nested = reply.translations.unwrap_or_default();
    let pick = |primary: Option<String>, flat: Option<String>| {
        primary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| flat.map(|s| s.trim().to_string()))
            .unwrap_or_default()
    };

    Ok(RemoteCandidate {
        surface: reply.surface.trim().to_string(),
        base_form: reply.base_form.trim().to_string(),
        hiragana: pick(reply.hiragana, reply.katakana),
        phonetics: reply.phonetics.unwrap_or_default().trim().to_string(),
        translations: Translations {
            zh: pick(nested.zh, reply.zh),
            en: pick(nested.en, reply.en),
            ja: pick(nested.ja, reply.ja),
        },
        confidence: reply.confidence.as_ref().map_or(0.0, confidence_value),
        source,
    })
}

fn confidence_value(value: &serde_json::Value) -> f32 {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => n.clamp(0.0, 1.0) as f32,
        _ => 0.0,
    }
}
