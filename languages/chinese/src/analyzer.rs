use shiori_core::classify::is_single_word;
use shiori_core::language::Language;
use shiori_core::preprocess::{collapse_whitespace, compact};
use shiori_core::types::{ClickedWord, LocalAnalysis};

/// Chinese has no inflection: the base form is the selection without spaces
#[derive(Default)]
pub struct ChineseProcessor;

impl ChineseProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_locally(&self, text: &str) -> LocalAnalysis {
        let surface = collapse_whitespace(text);
        let compacted = compact(&surface);
        let length = compacted.chars().count();

        let confidence = if is_single_word(&compacted, Language::Zh) {
            0.9
        } else if length <= 20 {
            0.82
        } else if length <= 120 {
            0.74
        } else {
            0.72
        };

        LocalAnalysis {
            base_form: if compacted.is_empty() {
                surface.clone()
            } else {
                compacted
            },
            surface,
            reading: String::new(),
            phonetics: String::new(),
            confidence,
        }
    }

    /// Characters are the click unit: `token_index` counts non-whitespace chars
    pub fn resolve_clicked_word(&self, text: &str, token_index: usize) -> ClickedWord {
        match text.chars().filter(|c| !c.is_whitespace()).nth(token_index) {
            Some(c) => ClickedWord::literal(&c.to_string(), String::new()),
            None => ClickedWord::literal(&collapse_whitespace(text), String::new()),
        }
    }

    /// Literal slice `[start, end)`, widened to one char when empty
    pub fn resolve_click_at(&self, text: &str, start: usize, end: usize) -> ClickedWord {
        let selected: String = text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start).max(1))
            .collect();
        let selected = selected.trim();
        if selected.is_empty() {
            return ClickedWord::literal(&collapse_whitespace(text), String::new());
        }
        ClickedWord::literal(selected, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_and_phrase_tiers() {
        let processor = ChineseProcessor::new();

        let word = processor.analyze_locally("学习");
        assert_eq!(word.base_form, "学习");
        assert_eq!(word.confidence, 0.9);

        let spaced = processor.analyze_locally("学 习 方法");
        assert_eq!(spaced.surface, "学 习 方法");
        assert_eq!(spaced.base_form, "学习方法");
        assert_eq!(spaced.confidence, 0.9);

        let phrase = processor.analyze_locally("我们今天一起去学习。");
        assert_eq!(phrase.confidence, 0.82);

        let long = "学".repeat(121);
        assert_eq!(processor.analyze_locally(&long).confidence, 0.72);
        let medium = "学".repeat(60);
        assert_eq!(processor.analyze_locally(&medium).confidence, 0.74);
    }

    #[test]
    fn token_click_picks_one_character() {
        let processor = ChineseProcessor::new();
        let clicked = processor.resolve_clicked_word("我们 一起学习", 3);
        assert_eq!(clicked.surface, "起");
        assert_eq!(clicked.base_form, "起");

        let fallback = processor.resolve_clicked_word("学习", 9);
        assert_eq!(fallback.surface, "学习");
    }

    #[test]
    fn offset_click_is_literal_slice() {
        let processor = ChineseProcessor::new();
        assert_eq!(processor.resolve_click_at("我们一起学习", 4, 6).surface, "学习");
        assert_eq!(processor.resolve_click_at("我们一起学习", 2, 2).surface, "一");
        assert_eq!(processor.resolve_click_at("学习", usize::MAX, usize::MAX).surface, "学习");
    }
}
