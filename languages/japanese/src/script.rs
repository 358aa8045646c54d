//! Hiragana/katakana conversion.

const KANA_OFFSET: u32 = 0x60;

/// ァ..ヶ map onto ぁ..ゖ; everything else passes through
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{30a1}'..='\u{30f6}' => shift(c, |code| code - KANA_OFFSET),
            _ => c,
        })
        .collect()
}

pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => shift(c, |code| code + KANA_OFFSET),
            _ => c,
        })
        .collect()
}

fn shift(c: char, f: impl Fn(u32) -> u32) -> char {
    char::from_u32(f(c as u32)).unwrap_or(c)
}

/// Non-empty and entirely hiragana (prolonged sound mark allowed)
pub fn is_hiragana(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| matches!(c, '\u{3040}'..='\u{309f}' | 'ー'))
}

/// Non-empty and entirely katakana
pub fn is_katakana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| matches!(c, '\u{30a0}'..='\u{30ff}'))
}

/// Clean up a reading coming from outside: kana-only input is returned as
/// hiragana with whitespace collapsed, anything else is rejected as empty.
pub fn normalize_phonetic(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let letters: String = collapsed.chars().filter(|c| *c != ' ').collect();
    if is_hiragana(&letters) {
        collapsed
    } else if is_katakana(&letters) {
        katakana_to_hiragana(&collapsed)
    } else {
        String::new()
    }
}
