use std::env;

use serde::{Deserialize, Serialize};

/// One OpenAI-compatible chat completions provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    /// `deepseek` or `groq`
    pub name: String,
    #[serde(default)]
    pub api_key: String,
    pub chat_url: String,
    pub selection_model: String,
    pub translation_model: String,
    #[serde(default)]
    pub selection_max_tokens: Option<u32>,
    #[serde(default)]
    pub translation_max_tokens: Option<u32>,
    /// Translation input is clipped to this many chars
    pub translation_clip_chars: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.2
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn trim_slashes(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

impl ProviderConfig {
    pub fn deepseek_from_env() -> Self {
        let base_url = trim_slashes(env_or("DEEPSEEK_BASE_URL", "https://api.deepseek.com"));
        let model = env_or("DEEPSEEK_SELECTION_MODEL", "deepseek-chat");

        Self {
            name: "deepseek".to_string(),
            api_key: env_or("DEEPSEEK_API_KEY", ""),
            chat_url: format!("{base_url}/v1/chat/completions"),
            selection_model: model.clone(),
            translation_model: model,
            selection_max_tokens: None,
            translation_max_tokens: None,
            translation_clip_chars: 220,
            temperature: default_temperature(),
        }
    }

    pub fn groq_from_env() -> Self {
        let base_url = trim_slashes(env_or("GROQ_BASE_URL", "https://api.groq.com/openai/v1"));
        let model = env_or("GROQ_MODEL", "llama-3.3-70b-versatile");

        Self {
            name: "groq".to_string(),
            api_key: env_or("GROQ_API_KEY", ""),
            chat_url: format!("{base_url}/chat/completions"),
            selection_model: env_or("SELECTION_GROQ_MODEL", &model),
            translation_model: model,
            selection_max_tokens: Some(280),
            translation_max_tokens: Some(180),
            translation_clip_chars: 180,
            temperature: default_temperature(),
        }
    }

    /// Providers without a key are skipped
    pub fn is_usable(&self) -> bool {
        !self.api_key.is_empty() && !self.chat_url.is_empty()
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RefinerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Tried in order; the first usable candidate wins
    pub providers: Vec<ProviderConfig>,
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            providers: Vec::new(),
        }
    }
}

impl RefinerConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: default_enabled(),
            providers: vec![ProviderConfig::deepseek_from_env(), ProviderConfig::groq_from_env()],
        }
    }

    pub fn usable_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.is_usable())
    }
}
