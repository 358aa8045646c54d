use shiori_core::classify::has_sentence_end;
use shiori_core::language::{Token, Tokenizer};
use shiori_core::types::{ClickedWord, LocalAnalysis};

use crate::click::find_clicked_token_index;
use crate::deconjugator::JapaneseDeconjugator;
use crate::phrase::detect_verb_phrase;
use crate::reading::build_reading;
use crate::tokenizer::SharedTokenizer;

/// Nominal suffixes that mark a selection as a likely vocabulary item
const ABSTRACT_SUFFIXES: &[&str] = &["性", "化", "力", "感", "度", "率", "的", "的に"];

/// Japanese language processor
pub struct JapaneseProcessor {
    tokenizer: SharedTokenizer,
    deconjugator: JapaneseDeconjugator,
}

impl JapaneseProcessor {
    pub fn new(tokenizer: SharedTokenizer) -> Self {
        Self {
            tokenizer,
            deconjugator: JapaneseDeconjugator::new(),
        }
    }

    pub fn tokenizer(&self) -> &SharedTokenizer {
        &self.tokenizer
    }

    pub async fn analyze_locally(&self, text: &str) -> LocalAnalysis {
        let tokenizer = self.tokenizer.get().await;
        self.analyze_with(text, tokenizer.as_deref())
    }

    /// Surface, base form, reading and confidence of a whole selection
    pub fn analyze_with(&self, text: &str, tokenizer: Option<&dyn Tokenizer>) -> LocalAnalysis {
        let tokens = tokenizer.map(|t| t.tokenize(text)).unwrap_or_default();
        let surface = if tokens.is_empty() {
            text.to_string()
        } else {
            join_surfaces(&tokens)
        };
        let base_form = if tokens.is_empty() {
            surface.clone()
        } else {
            self.deconjugator
                .selection_base_form(&tokens, &surface, tokenizer)
        };
        let reading = build_reading(&tokens, &surface).hiragana;
        let confidence = local_confidence(text, &surface, tokens.len());

        LocalAnalysis {
            surface,
            base_form,
            reading,
            phonetics: String::new(),
            confidence,
        }
    }

    pub async fn resolve_clicked_word(&self, text: &str, token_index: usize) -> ClickedWord {
        let tokenizer = self.tokenizer.get().await;
        let Some(tokenizer) = tokenizer.as_deref() else {
            return literal(text);
        };
        let tokens = tokenizer.tokenize(text);
        self.clicked_from_tokens(text, &tokens, token_index, Some(tokenizer))
    }

    /// Click given as char offsets into `text`
    pub async fn resolve_click_at(&self, text: &str, start: usize, end: usize) -> ClickedWord {
        let tokenizer = self.tokenizer.get().await;
        let Some(tokenizer) = tokenizer.as_deref() else {
            return literal(text);
        };
        let tokens = tokenizer.tokenize(text);
        match find_clicked_token_index(&tokens, start, end) {
            Some(index) => self.clicked_from_tokens(text, &tokens, index, Some(tokenizer)),
            None => literal(text),
        }
    }

    /// The phrase around `index`, with the head verb in dictionary form
    pub fn clicked_from_tokens(
        &self,
        text: &str,
        tokens: &[Token],
        index: usize,
        tokenizer: Option<&dyn Tokenizer>,
    ) -> ClickedWord {
        if index >= tokens.len() {
            return literal(text);
        }

        let span = detect_verb_phrase(tokens, index);
        let phrase = &tokens[span.start..=span.end];
        let surface = join_surfaces(phrase);
        tracing::debug!(
            "Clicked token {} resolved to span {}..={} ({})",
            index,
            span.start,
            span.end,
            surface
        );

        ClickedWord {
            base_form: self
                .deconjugator
                .phrase_base_form(phrase, &surface, tokenizer),
            reading: build_reading(phrase, &surface).hiragana,
            surface,
        }
    }
}

fn join_surfaces(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.surface.as_str()).collect()
}

fn literal(text: &str) -> ClickedWord {
    ClickedWord::literal(text, build_reading(&[], text).hiragana)
}

fn local_confidence(text: &str, surface: &str, token_count: usize) -> f32 {
    let length = text.chars().count();
    let mut confidence = if token_count == 1 {
        0.92
    } else if length <= 16 && !has_sentence_end(text) {
        0.82
    } else if length <= 40 {
        0.72
    } else {
        0.62
    };
    if ABSTRACT_SUFFIXES.iter().any(|suffix| surface.ends_with(suffix)) {
        confidence = f32::min(0.95, confidence + 0.08);
    }
    confidence
}
