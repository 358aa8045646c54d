use shiori_core::classify::is_single_word;
use shiori_core::language::Language;
use shiori_core::preprocess::collapse_whitespace;
use shiori_core::types::{ClickedWord, LocalAnalysis};

use crate::lemmatizer::EnglishLemmatizer;

/// English language processor
pub struct EnglishProcessor {
    lemmatizer: EnglishLemmatizer,
}

impl Default for EnglishProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishProcessor {
    pub fn new() -> Self {
        Self {
            lemmatizer: EnglishLemmatizer::new(),
        }
    }

    /// Only single words are lemmatized; phrases keep their surface
    pub fn analyze_locally(&self, text: &str) -> LocalAnalysis {
        let surface = collapse_whitespace(text);
        let is_word = is_single_word(&surface, Language::En);
        let base_form = if is_word {
            self.lemmatizer.lemmatize(&surface)
        } else {
            surface.clone()
        };

        let length = surface.chars().count();
        let confidence = if is_word {
            0.92
        } else if length <= 60 {
            0.8
        } else if length <= 180 {
            0.72
        } else {
            0.65
        };

        LocalAnalysis {
            surface,
            base_form,
            reading: String::new(),
            phonetics: String::new(),
            confidence,
        }
    }

    /// Word under a click at char offsets `[start, end)`
    pub fn resolve_click_at(&self, text: &str, start: usize, end: usize) -> ClickedWord {
        let chars: Vec<char> = text.chars().collect();
        let start = start.min(chars.len());
        let end = end.clamp(start, chars.len());

        let mut begin = start;
        while begin > 0 && is_word_char(chars[begin - 1]) {
            begin -= 1;
        }
        let mut finish = end;
        while finish < chars.len() && is_word_char(chars[finish]) {
            finish += 1;
        }

        let word: String = chars[begin..finish].iter().collect();
        self.clicked(&word, text)
    }

    /// Click given as the index of a whitespace-separated word
    pub fn resolve_clicked_word(&self, text: &str, token_index: usize) -> ClickedWord {
        let word = text.split_whitespace().nth(token_index).unwrap_or_default();
        self.clicked(word, text)
    }

    fn clicked(&self, word: &str, text: &str) -> ClickedWord {
        let word = word.trim_matches(|c: char| !c.is_ascii_alphabetic());
        if word.is_empty() {
            let text = collapse_whitespace(text);
            return ClickedWord::literal(&text, String::new());
        }
        ClickedWord {
            surface: word.to_string(),
            base_form: self.lemmatizer.lemmatize(word),
            reading: String::new(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '\'' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_lemmatized() {
        let analysis = EnglishProcessor::new().analyze_locally("  Running ");
        assert_eq!(analysis.surface, "Running");
        assert_eq!(analysis.base_form, "run");
        assert_eq!(analysis.confidence, 0.92);
    }

    #[test]
    fn phrases_keep_surface() {
        let processor = EnglishProcessor::new();
        let analysis = processor.analyze_locally("took   off");
        assert_eq!(analysis.surface, "took off");
        assert_eq!(analysis.base_form, "took off");
        assert_eq!(analysis.confidence, 0.8);

        let medium = "word ".repeat(20);
        assert_eq!(processor.analyze_locally(&medium).confidence, 0.72);
        let long = "word ".repeat(40);
        assert_eq!(processor.analyze_locally(&long).confidence, 0.65);
    }

    #[test]
    fn click_picks_surrounding_word() {
        let processor = EnglishProcessor::new();
        let word = processor.resolve_click_at("She kept running, fast.", 10, 10);
        assert_eq!(word.surface, "running");
        assert_eq!(word.base_form, "run");

        let word = processor.resolve_clicked_word("She kept running, fast.", 2);
        assert_eq!(word.surface, "running");

        let word = processor.resolve_click_at("  ...  ", 3, 4);
        assert_eq!(word.surface, "...");
    }
}
