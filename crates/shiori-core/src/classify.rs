//! Word/phrase classification of raw selections.
//!
//! Everything here is pure and works on the whitespace-normalized string.

use crate::language::{Language, is_cjk_ideograph, is_kana};
use crate::preprocess::{collapse_whitespace, compact};
use crate::types::Mode;

/// Sentence-ending and list-separating punctuation, full and half width
pub const BOUNDARY_PUNCTUATION: &[char] = &[
    '。', '．', '.', '!', '！', '?', '？', ',', '，', '、', ';', '；', ':', '：', '-', '–', '—',
];

/// Sentence-ending punctuation only
pub const SENTENCE_END_PUNCTUATION: &[char] = &['。', '．', '.', '!', '！', '?', '？'];

pub const MAX_CHINESE_WORD_CHARS: usize = 6;
pub const MAX_CJK_PHRASE_CHARS: usize = 24;
pub const MIN_ENGLISH_PHRASE_WORDS: usize = 2;
pub const MAX_ENGLISH_PHRASE_WORDS: usize = 6;

pub fn has_boundary_punctuation(text: &str) -> bool {
    text.chars().any(|c| BOUNDARY_PUNCTUATION.contains(&c))
}

pub fn has_sentence_end(text: &str) -> bool {
    text.chars().any(|c| SENTENCE_END_PUNCTUATION.contains(&c))
}

pub fn classify(text: &str, language: Language) -> Mode {
    if is_single_word(text, language) {
        Mode::Word
    } else {
        Mode::Phrase
    }
}

pub fn is_single_word(text: &str, language: Language) -> bool {
    let q = collapse_whitespace(text);
    if q.is_empty() {
        return false;
    }
    match language {
        Language::En => is_english_word(&q),
        Language::Ja => !q.chars().any(char::is_whitespace) && !has_boundary_punctuation(&q),
        Language::Zh => {
            !q.chars().any(char::is_whitespace)
                && q.chars().any(is_cjk_ideograph)
                && !has_boundary_punctuation(&q)
                && q.chars().count() <= MAX_CHINESE_WORD_CHARS
        }
    }
}

/// `letters('letters)?(-letters('letters)?)*`
pub fn is_english_word(text: &str) -> bool {
    text.split('-').all(is_english_segment)
}

fn is_english_segment(segment: &str) -> bool {
    let mut parts = segment.splitn(2, '\'');
    let head = parts.next().unwrap_or_default();
    let is_letters = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
    match parts.next() {
        Some(tail) => is_letters(head) && is_letters(tail),
        None => is_letters(head),
    }
}

/// Whitespace-delimited run of 2 to 6 English words without punctuation
pub fn is_english_phrase_shape(text: &str) -> bool {
    let q = collapse_whitespace(text);
    if q.is_empty() || has_boundary_punctuation_except_hyphen(&q) {
        return false;
    }
    if q
        .chars()
        .any(|c| !(c.is_ascii_alphabetic() || c == '\'' || c == '-' || c == ' '))
    {
        return false;
    }
    let words: Vec<&str> = q.split(' ').collect();
    (MIN_ENGLISH_PHRASE_WORDS..=MAX_ENGLISH_PHRASE_WORDS).contains(&words.len())
        && words.iter().all(|word| is_english_word(word))
}

fn has_boundary_punctuation_except_hyphen(text: &str) -> bool {
    text.chars()
        .any(|c| c != '-' && BOUNDARY_PUNCTUATION.contains(&c))
}

/// Short CJK run that can stand as a lexical item
pub fn is_cjk_phrase_shape(text: &str) -> bool {
    let q = compact(text);
    if q.is_empty() || q.chars().count() > MAX_CJK_PHRASE_CHARS {
        return false;
    }
    if !q.chars().any(|c| is_kana(c) || is_cjk_ideograph(c)) {
        return false;
    }
    !has_boundary_punctuation(&q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_words() {
        assert!(is_single_word("don't", Language::En));
        assert!(is_single_word("well-known", Language::En));
        assert!(is_single_word("mother-in-law", Language::En));
        assert!(is_single_word("  run  ", Language::En));
        assert!(!is_single_word("take off", Language::En));
        assert!(!is_single_word("it's'", Language::En));
        assert!(!is_single_word("-run", Language::En));
        assert!(!is_single_word("abc1", Language::En));
    }

    #[test]
    fn japanese_words() {
        assert_eq!(classify("食べてしまいました", Language::Ja), Mode::Word);
        assert_eq!(classify("食べた。寝た", Language::Ja), Mode::Phrase);
        assert_eq!(classify("猫 が", Language::Ja), Mode::Phrase);
        assert_eq!(classify("そう、", Language::Ja), Mode::Phrase);
    }

    #[test]
    fn chinese_six_ideographs_is_a_word() {
        assert_eq!(classify("一二三四五六", Language::Zh), Mode::Word);
        assert_eq!(classify("一二三四五六七", Language::Zh), Mode::Phrase);
        assert_eq!(classify("abc", Language::Zh), Mode::Phrase);
        assert_eq!(classify("学习，", Language::Zh), Mode::Phrase);
    }

    #[test]
    fn english_phrase_shape() {
        assert!(is_english_phrase_shape("take it off"));
        assert!(is_english_phrase_shape("state-of-the-art design"));
        assert!(!is_english_phrase_shape("run"));
        assert!(!is_english_phrase_shape("one two three four five six seven"));
        assert!(!is_english_phrase_shape("stop, now"));
        assert!(!is_english_phrase_shape("buy 2 apples"));
    }

    #[test]
    fn cjk_phrase_shape() {
        assert!(is_cjk_phrase_shape("気 に なる"));
        assert!(!is_cjk_phrase_shape("hello world"));
        assert!(!is_cjk_phrase_shape("食べた。"));
        assert!(!is_cjk_phrase_shape(&"字".repeat(25)));
    }
}
