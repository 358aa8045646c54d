use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::refiner::{ProviderConfig, RefinerConfig};
use self::selection::SelectionConfig;
use self::tokenizer::TokenizerConfig;
use self::translator::TranslatorConfig;

pub mod refiner;
pub mod selection;
pub mod tokenizer;
pub mod translator;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub tokenizer: TokenizerConfig,
    pub refiner: RefinerConfig,
    pub translator: TranslatorConfig,
    pub selection: SelectionConfig,
}

impl Config {
    /// Defaults with tokenizer and provider settings taken from the environment
    pub fn new() -> Self {
        Config {
            tokenizer: TokenizerConfig::from_env(),
            refiner: RefinerConfig::from_env(),
            translator: TranslatorConfig::default(),
            selection: SelectionConfig::default(),
        }
    }

    /// Load a JSON config file. Providers missing an API key pick it up
    /// from the environment so secrets can stay out of the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&data)?;

        if config.refiner.providers.is_empty() {
            config.refiner.providers = RefinerConfig::from_env().providers;
        }
        for provider in &mut config.refiner.providers {
            if provider.api_key.is_empty() {
                provider.api_key = env_key_for(provider);
            }
        }

        Ok(config)
    }
}

fn env_key_for(provider: &ProviderConfig) -> String {
    let key = format!("{}_API_KEY", provider.name.to_uppercase());
    std::env::var(key).unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_default_when_missing() {
        let config: Config = serde_json::from_str(r#"{"selection":{"debounce_ms":10}}"#).unwrap();
        assert_eq!(config.selection.debounce_ms, 10);
        assert_eq!(config.selection.dedup_window_ms, 800);
        assert_eq!(config.selection.min_confidence, 0.45);
        assert!(config.translator.enabled);
        assert_eq!(config.tokenizer.backend, tokenizer::TokenizerBackend::Lindera);
    }

    #[test]
    fn provider_without_key_is_unusable() {
        let mut provider = ProviderConfig::groq_from_env();
        provider.api_key = String::new();
        assert!(!provider.is_usable());
        provider.api_key = "k".to_string();
        assert!(provider.is_usable());
        assert!(provider.chat_url.ends_with("/chat/completions"));
    }
}
