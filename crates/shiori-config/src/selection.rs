use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    40
}

fn default_dedup_window_ms() -> u64 {
    800
}

fn default_context_radius() -> usize {
    80
}

fn default_max_query_chars() -> usize {
    300
}

fn default_max_context_chars() -> usize {
    500
}

fn default_min_confidence() -> f32 {
    0.45
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SelectionConfig {
    /// Delay before a burst of selection events is analyzed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Identical selections inside this window are dropped
    #[serde(default = "default_dedup_window_ms")]
    pub dedup_window_ms: u64,
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
    /// Phrases below this confidence are not collected
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            dedup_window_ms: default_dedup_window_ms(),
            context_radius: default_context_radius(),
            max_query_chars: default_max_query_chars(),
            max_context_chars: default_max_context_chars(),
            min_confidence: default_min_confidence(),
        }
    }
}
