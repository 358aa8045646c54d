use shiori_core::language::Language;
use shiori_core::preprocess::selection_context;
use shiori_core::types::SelectionQuery;

use crate::cache::SelectionCache;

/// The open document and everything cached against it. Opening another
/// document or switching its language starts a fresh session.
#[derive(Debug)]
pub struct DocumentSession {
    id: String,
    language: Language,
    text: String,
    pub cache: SelectionCache,
}

impl DocumentSession {
    pub fn new(id: impl Into<String>, language: Language, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language,
            text: text.into(),
            cache: SelectionCache::new(),
        }
    }

    /// Session with no document, for one-off analyses
    pub fn detached(language: Language) -> Self {
        Self::new("", language, "")
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_same_document(&self, id: &str, language: Language) -> bool {
        self.id == id && self.language == language
    }

    /// Selected char range `[start, end)` of the document
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Query for a selection in this document, with surrounding text as context
    pub fn query(
        &self,
        text: &str,
        start: usize,
        end: usize,
        radius: usize,
        language: Option<Language>,
    ) -> SelectionQuery {
        SelectionQuery::new(text, language.unwrap_or(self.language))
            .with_context(selection_context(&self.text, start, end, radius))
            .with_offsets(start, end)
    }
}
