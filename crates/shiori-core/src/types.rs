use serde::{Deserialize, Serialize};

use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Word,
    Phrase,
}

/// Where the accepted analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Local,
    Deepseek,
    Groq,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Local => "local",
            Source::Deepseek => "deepseek",
            Source::Groq => "groq",
        }
    }

    /// Remote provider by configured name
    pub fn provider(name: &str) -> Option<Source> {
        match name.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Some(Source::Deepseek),
            "groq" => Some(Source::Groq),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    #[serde(default)]
    pub zh: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub ja: String,
}

impl Translations {
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Zh => &self.zh,
            Language::En => &self.en,
            Language::Ja => &self.ja,
        }
    }

    pub fn set(&mut self, language: Language, text: String) {
        match language {
            Language::Zh => self.zh = text,
            Language::En => self.en = text,
            Language::Ja => self.ja = text,
        }
    }
}

/// A click or drag selection issued by the reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionQuery {
    pub text: String,
    pub language: Language,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub clicked_start: usize,
    #[serde(default)]
    pub clicked_end: usize,
}

impl SelectionQuery {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            context: String::new(),
            clicked_start: 0,
            clicked_end: 0,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_offsets(mut self, clicked_start: usize, clicked_end: usize) -> Self {
        self.clicked_start = clicked_start;
        self.clicked_end = clicked_end;
        self
    }
}

/// Final structured analysis of a selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub query: String,
    pub language: Language,
    pub mode: Mode,
    pub surface: String,
    pub base_form: String,
    /// Hiragana for Japanese, empty otherwise
    pub reading: String,
    pub phonetics: String,
    pub translations: Translations,
    pub confidence: f32,
    pub source: Source,
}

/// Best-effort analysis computed without any remote call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalAnalysis {
    pub surface: String,
    pub base_form: String,
    /// Hiragana reading, Japanese only
    pub reading: String,
    pub phonetics: String,
    pub confidence: f32,
}

/// Lexical unit resolved around a clicked token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickedWord {
    pub surface: String,
    pub base_form: String,
    pub reading: String,
}

impl ClickedWord {
    /// Opaque literal used when no tokenization is available
    pub fn literal(text: &str, reading: String) -> Self {
        Self {
            surface: text.to_string(),
            base_form: text.to_string(),
            reading,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Reader opened a new document; the selection cache is replaced
    OpenDocument {
        id: String,
        language: Language,
        text: String,
    },
    Select {
        text: String,
        start: usize,
        end: usize,
        language: Option<Language>,
    },
    ClickToken {
        index: usize,
    },
    ClickAt {
        start: usize,
        end: usize,
    },
    ClearCache,
    ShowSelection(Option<SelectionResult>),
    ShowClicked(ClickedWord),
    StatusUpdate(String),
    /// Input is exhausted; pending events are finished first
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serializes_camel_case() {
        let result = SelectionResult {
            query: "q".into(),
            language: Language::Ja,
            mode: Mode::Phrase,
            surface: "s".into(),
            base_form: "b".into(),
            reading: String::new(),
            phonetics: String::new(),
            translations: Translations::default(),
            confidence: 0.5,
            source: Source::Deepseek,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["baseForm"], "b");
        assert_eq!(json["source"], "deepseek");
        assert_eq!(json["mode"], "phrase");
    }

    #[test]
    fn query_defaults_optional_fields() {
        let query: SelectionQuery =
            serde_json::from_str(r#"{"text":"run","language":"en"}"#).unwrap();
        assert_eq!(query, SelectionQuery::new("run", Language::En));
    }
}
