//! Verb-phrase spans: which tokens around a click belong to one lexical unit.

use shiori_core::language::{Span, Token};

use crate::pos;

/// Surfaces of する/できる that carry a preceding verbal noun
const LIGHT_VERB_SURFACES: &[&str] = &[
    "する", "し", "して", "した", "しろ", "せよ", "せ", "され", "させ", "できる", "でき", "できて",
    "できた",
];

/// Verbs that attach to a て-form as aspect or direction markers
const AUXILIARY_VERB_BASES: &[&str] = &["いる", "ある", "いく", "くる", "おく", "みる", "しまう"];

pub fn is_verb(token: &Token) -> bool {
    token.is_pos(pos::VERB)
}

pub fn is_sahen_noun(token: &Token) -> bool {
    token.is_pos(pos::NOUN) && token.pos_detail == pos::SAHEN_CONNECTION
}

pub fn is_light_verb(token: &Token) -> bool {
    matches!(token.base_form.as_deref(), Some("する" | "できる"))
        || LIGHT_VERB_SURFACES.contains(&token.surface.as_str())
}

fn is_te_particle(token: &Token) -> bool {
    token.is_pos(pos::PARTICLE) && matches!(token.surface.as_str(), "て" | "で")
}

fn starts_phrase(tokens: &[Token], index: usize) -> bool {
    let token = &tokens[index];
    is_verb(token)
        || (is_sahen_noun(token) && tokens.get(index + 1).is_some_and(is_light_verb))
}

fn joins_phrase(previous: &Token, next: &Token) -> bool {
    if next.is_pos(pos::AUXILIARY) || is_te_particle(next) {
        return true;
    }
    if !is_verb(next) {
        return false;
    }
    is_light_verb(next)
        || next.pos_detail == pos::SUFFIX
        || next.pos_detail == pos::DEPENDENT
        || next
            .base_form
            .as_deref()
            .is_some_and(|base| AUXILIARY_VERB_BASES.contains(&base))
        || is_te_particle(previous)
}

/// Every maximal verb phrase in `tokens`, left to right.
pub fn verb_phrase_spans(tokens: &[Token]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        if !starts_phrase(tokens, index) {
            index += 1;
            continue;
        }

        let start = index;
        let mut end = index;
        while end + 1 < tokens.len() && joins_phrase(&tokens[end], &tokens[end + 1]) {
            end += 1;
        }
        spans.push(Span { start, end });
        index = end + 1;
    }

    spans
}

/// The widest verb phrase containing `clicked`, the earliest on ties, or
/// the clicked token alone when it is not part of any phrase.
pub fn detect_verb_phrase(tokens: &[Token], clicked: usize) -> Span {
    verb_phrase_spans(tokens)
        .into_iter()
        .filter(|span| span.contains(clicked))
        .fold(None::<Span>, |best, span| match best {
            Some(best) if best.width() >= span.width() => Some(best),
            _ => Some(span),
        })
        .unwrap_or(Span::single(clicked))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use shiori_core::language::{RawToken, assign_offsets};

    /// `(surface, base, pos, detail)` with `*` meaning absent
    pub(crate) fn tokens(text: &str, entries: &[(&str, &str, &str, &str)]) -> Vec<Token> {
        let raws = entries
            .iter()
            .map(|(surface, base, pos, detail)| RawToken {
                surface_form: Some(surface.to_string()),
                basic_form: Some(base.to_string()),
                pos: Some(pos.to_string()),
                pos_detail_1: Some(detail.to_string()),
                ..Default::default()
            })
            .collect();
        assign_offsets(text, raws)
    }

    pub(crate) fn tabete_shimaimashita() -> Vec<Token> {
        tokens(
            "食べてしまいました",
            &[
                ("食べ", "食べる", "動詞", "自立"),
                ("て", "て", "助詞", "接続助詞"),
                ("しまい", "しまう", "動詞", "非自立"),
                ("まし", "ます", "助動詞", "*"),
                ("た", "た", "助動詞", "*"),
            ],
        )
    }

    #[test]
    fn te_chain_forms_one_span() {
        let tokens = tabete_shimaimashita();
        for clicked in 0..tokens.len() {
            assert_eq!(detect_verb_phrase(&tokens, clicked), Span { start: 0, end: 4 });
        }
    }

    #[test]
    fn verbal_noun_with_light_verb() {
        let tokens = tokens(
            "毎日勉強します",
            &[
                ("毎日", "毎日", "名詞", "副詞可能"),
                ("勉強", "勉強", "名詞", "サ変接続"),
                ("し", "する", "動詞", "自立"),
                ("ます", "ます", "助動詞", "*"),
            ],
        );
        assert_eq!(detect_verb_phrase(&tokens, 1), Span { start: 1, end: 3 });
        assert_eq!(detect_verb_phrase(&tokens, 0), Span::single(0));
    }

    #[test]
    fn verbal_noun_alone_is_not_a_phrase() {
        let tokens = tokens(
            "勉強が好き",
            &[
                ("勉強", "勉強", "名詞", "サ変接続"),
                ("が", "が", "助詞", "格助詞"),
                ("好き", "好き", "名詞", "形容動詞語幹"),
            ],
        );
        assert!(verb_phrase_spans(&tokens).is_empty());
        assert_eq!(detect_verb_phrase(&tokens, 0), Span::single(0));
    }

    #[test]
    fn separate_phrases_stay_separate() {
        let tokens = tokens(
            "見て帰った人が走る",
            &[
                ("見", "見る", "動詞", "自立"),
                ("て", "て", "助詞", "接続助詞"),
                ("帰っ", "帰る", "動詞", "自立"),
                ("た", "た", "助動詞", "*"),
                ("人", "人", "名詞", "一般"),
                ("が", "が", "助詞", "格助詞"),
                ("走る", "走る", "動詞", "自立"),
            ],
        );
        assert_eq!(
            verb_phrase_spans(&tokens),
            vec![Span { start: 0, end: 3 }, Span { start: 6, end: 6 }]
        );
        assert_eq!(detect_verb_phrase(&tokens, 6), Span::single(6));
        assert_eq!(detect_verb_phrase(&tokens, 4), Span::single(4));
    }

    #[test]
    fn conjunctive_shi_does_not_join() {
        let tokens = tokens(
            "降るし",
            &[
                ("降る", "降る", "動詞", "自立"),
                ("し", "し", "助詞", "接続助詞"),
            ],
        );
        assert_eq!(detect_verb_phrase(&tokens, 0), Span::single(0));
        assert_eq!(detect_verb_phrase(&tokens, 1), Span::single(1));
    }

    #[test]
    fn noun_spelled_like_light_verb_does_not_join() {
        let tokens = tokens(
            "落ちたした",
            &[
                ("落ち", "落ちる", "動詞", "自立"),
                ("た", "た", "助動詞", "*"),
                ("した", "下", "名詞", "一般"),
            ],
        );
        assert_eq!(detect_verb_phrase(&tokens, 0), Span { start: 0, end: 1 });
        assert_eq!(detect_verb_phrase(&tokens, 2), Span::single(2));
    }

    #[test]
    fn empty_tokens_fall_back_to_click() {
        assert_eq!(detect_verb_phrase(&[], 0), Span::single(0));
    }
}
