use shiori_core::language::Token;

use crate::script::{hiragana_to_katakana, is_hiragana, is_katakana, katakana_to_hiragana};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reading {
    pub hiragana: String,
    pub katakana: String,
}

/// Join per-token readings. Tokens without a reading contribute their kana
/// surface, or the surface verbatim when it contains anything else. With no
/// tokens at all the fallback text is converted as a whole.
pub fn build_reading(tokens: &[Token], fallback: &str) -> Reading {
    let joined: String = tokens.iter().map(token_reading).collect();
    let hiragana = if joined.trim().is_empty() {
        katakana_to_hiragana(fallback)
    } else {
        joined
    };
    Reading {
        katakana: hiragana_to_katakana(&hiragana),
        hiragana,
    }
}

fn token_reading(token: &Token) -> String {
    if let Some(reading) = &token.reading {
        return katakana_to_hiragana(reading);
    }
    if is_hiragana(&token.surface) {
        token.surface.clone()
    } else if is_katakana(&token.surface) {
        katakana_to_hiragana(&token.surface)
    } else {
        token.surface.clone()
    }
}
