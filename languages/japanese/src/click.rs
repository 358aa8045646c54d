//! Locating a click inside tokenized text.

use shiori_core::language::Token;

const SENTENCE_BOUNDARIES: &[char] = &['\n', '。', '．', '.', '!', '！', '?', '？'];

/// Index of the first token overlapping `[start, end)`. A zero-width click
/// is widened to one char.
pub fn find_clicked_token_index(tokens: &[Token], start: usize, end: usize) -> Option<usize> {
    let end = end.max(start.saturating_add(1));
    tokens
        .iter()
        .position(|token| token.start < end && token.end() > start)
}

/// Sentence containing a click, with offsets relative to `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceWindow {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Cut the sentence around `[start, end)` out of a document. The sentence
/// keeps its closing punctuation; line breaks are not included. Offsets are
/// rebased onto the window.
pub fn sentence_window(document: &str, start: usize, end: usize) -> SentenceWindow {
    let chars: Vec<char> = document.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    let begin = chars[..start]
        .iter()
        .rposition(|c| SENTENCE_BOUNDARIES.contains(c))
        .map_or(0, |i| i + 1);
    let finish = chars[end..]
        .iter()
        .position(|c| SENTENCE_BOUNDARIES.contains(c))
        .map_or(chars.len(), |i| {
            let boundary = end + i;
            if chars[boundary] == '\n' {
                boundary
            } else {
                boundary + 1
            }
        });

    SentenceWindow {
        text: chars[begin..finish].iter().collect(),
        start: start - begin,
        end: end - begin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::tests::tabete_shimaimashita;

    #[test]
    fn click_maps_to_overlapping_token() {
        let tokens = tabete_shimaimashita();
        assert_eq!(find_clicked_token_index(&tokens, 0, 1), Some(0));
        assert_eq!(find_clicked_token_index(&tokens, 2, 2), Some(1));
        assert_eq!(find_clicked_token_index(&tokens, 4, 6), Some(2));
        assert_eq!(find_clicked_token_index(&tokens, 9, 10), None);
        assert_eq!(find_clicked_token_index(&tokens, usize::MAX, usize::MAX), None);
    }

    #[test]
    fn window_is_one_sentence() {
        let window = sentence_window("朝起きた。パンを食べてしまいました。寝た", 9, 10);
        assert_eq!(window.text, "パンを食べてしまいました。");
        assert_eq!((window.start, window.end), (4, 5));
    }

    #[test]
    fn window_stops_at_line_breaks() {
        let window = sentence_window("first line\nsecond line\nthird", 14, 16);
        assert_eq!(window.text, "second line");
        assert_eq!((window.start, window.end), (3, 5));
    }

    #[test]
    fn window_clamps_offsets() {
        let window = sentence_window("短い", 10, 20);
        assert_eq!(window.text, "短い");
        assert_eq!((window.start, window.end), (2, 2));
    }
}
