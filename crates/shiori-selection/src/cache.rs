use std::collections::HashMap;

use shiori_core::language::Language;
use shiori_core::types::SelectionResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub language: Language,
    pub text: String,
    pub context: String,
}

impl CacheKey {
    pub fn new(language: Language, text: &str, context: &str) -> Self {
        Self {
            language,
            text: text.to_string(),
            context: context.to_string(),
        }
    }
}

/// Analyses of one document. A `None` entry records a selection that was
/// analyzed and judged unusable, so it is not sent upstream again.
#[derive(Debug, Default)]
pub struct SelectionCache {
    entries: HashMap<CacheKey, Option<SelectionResult>>,
}

impl SelectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&Option<SelectionResult>> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: CacheKey, result: Option<SelectionResult>) {
        self.entries.insert(key, result);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
