use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TokenizerError;

/// Reading languages supported by the selection engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ja,
    En,
    Zh,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn all() -> [Language; 3] {
        [Language::Zh, Language::En, Language::Ja]
    }

    /// Guess the language of a selection from the scripts it contains.
    /// Kana wins over everything, then Latin letters, then ideographs.
    pub fn detect(text: &str) -> Option<Language> {
        let text = text.trim();
        if text.chars().any(is_kana) {
            return Some(Language::Ja);
        }
        if text.chars().any(|c| c.is_ascii_alphabetic()) {
            return Some(Language::En);
        }
        if text.chars().any(is_cjk_ideograph) {
            return Some(Language::Zh);
        }
        None
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported language: {0}, expected ja, en or zh")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" => Ok(Language::Ja),
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Hiragana, katakana and the katakana phonetic extensions
pub fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{30ff}' | '\u{31f0}'..='\u{31ff}')
}

pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(
        c,
        '\u{3400}'..='\u{4dbf}' | '\u{4e00}'..='\u{9fff}' | '\u{f900}'..='\u{faff}'
    )
}

/// One morphological unit produced by a tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    pub base_form: Option<String>,
    pub pos: String,
    pub pos_detail: String,
    pub reading: Option<String>,
    /// Char offset in the tokenized text
    pub start: usize,
}

impl Token {
    /// Validate a loosely-shaped tokenizer record. Empty and `*` fields are
    /// placeholders and become `None`.
    pub fn from_raw(raw: RawToken, start: usize) -> Self {
        Self {
            surface: raw.surface_form.unwrap_or_default(),
            base_form: usable(raw.basic_form),
            pos: raw.pos.unwrap_or_default(),
            pos_detail: raw.pos_detail_1.unwrap_or_default(),
            reading: usable(raw.reading),
            start,
        }
    }

    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }

    pub fn end(&self) -> usize {
        self.start + self.char_len()
    }

    pub fn is_pos(&self, pos: &str) -> bool {
        self.pos == pos
    }
}

fn usable(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && value != "*")
}

/// Record shape emitted by kuromoji/MeCab style tokenizers.
/// Every field is optional; `word_position` is 1-based when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    #[serde(default)]
    pub surface_form: Option<String>,
    #[serde(default)]
    pub basic_form: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub pos_detail_1: Option<String>,
    #[serde(default)]
    pub reading: Option<String>,
    #[serde(default)]
    pub word_position: Option<usize>,
}

/// Turn raw records into ordered tokens with char offsets into `text`.
///
/// A declared `word_position` is trusted only if it keeps the sequence
/// non-overlapping; otherwise the surface is searched for from the cursor,
/// which also skips whitespace the tokenizer dropped.
pub fn assign_offsets(text: &str, raws: Vec<RawToken>) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut cursor = 0usize;
    let mut tokens = Vec::with_capacity(raws.len());

    for raw in raws {
        let surface: Vec<char> = raw
            .surface_form
            .as_deref()
            .unwrap_or_default()
            .chars()
            .collect();
        let declared = raw
            .word_position
            .map(|pos| pos.saturating_sub(1))
            .filter(|&pos| pos >= cursor);
        let start = declared
            .or_else(|| find_from(&chars, &surface, cursor))
            .unwrap_or(cursor);
        let token = Token::from_raw(raw, start);
        cursor = token.end();
        tokens.push(token);
    }

    tokens
}

fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

/// Inclusive range of token indices forming one lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }

    /// `end - start`, zero for a single token
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Morphological tokenizer, synchronous once initialized
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// One-time, possibly slow, construction of a tokenizer
#[async_trait::async_trait]
pub trait TokenizerLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Tokenizer>, TokenizerError>;
}
