use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_targets() -> Vec<String> {
    vec!["zh".to_string(), "en".to_string(), "ja".to_string()]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Fill missing translations after the merge
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            targets: default_targets(),
        }
    }
}
