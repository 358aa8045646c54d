use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerBackend {
    /// In-process segmenter over the embedded IPADIC dictionary
    Lindera,
    /// JSON file of pre-tokenized text
    Pretokenized,
    /// Japanese selections are treated as opaque literals
    None,
}

fn default_backend() -> TokenizerBackend {
    TokenizerBackend::Lindera
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TokenizerConfig {
    #[serde(default = "default_backend")]
    pub backend: TokenizerBackend,
    pub pretokenized_path: Option<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            pretokenized_path: None,
        }
    }
}

impl TokenizerConfig {
    pub fn from_env() -> Self {
        let pretokenized_path = env::var("SHIORI_PRETOKENIZED").ok();
        let backend = match env::var("SHIORI_TOKENIZER").ok().as_deref() {
            Some("none") => TokenizerBackend::None,
            Some("pretokenized") => TokenizerBackend::Pretokenized,
            Some("lindera") => TokenizerBackend::Lindera,
            _ if pretokenized_path.is_some() => TokenizerBackend::Pretokenized,
            _ => default_backend(),
        };

        Self {
            backend,
            pretokenized_path,
        }
    }
}
