use shiori_core::language::{Token, Tokenizer};

use crate::phrase::{is_light_verb, is_sahen_noun, is_verb};

/// Longest first so ませんでした is not read as ません + でした
const POLITE_SUFFIXES: &[&str] = &["ませんでした", "ましょう", "ました", "ません", "ます"];

/// Last kana of a godan masu-stem and the dictionary ending it comes from
const MASU_STEM_ENDINGS: &[(char, char)] = &[
    ('い', 'う'),
    ('き', 'く'),
    ('ぎ', 'ぐ'),
    ('し', 'す'),
    ('ち', 'つ'),
    ('に', 'ぬ'),
    ('び', 'ぶ'),
    ('み', 'む'),
    ('り', 'る'),
];

/// え-row kana before る, mapped to the う-row of a potential godan verb
const E_ROW_ENDINGS: &[(char, char)] = &[
    ('け', 'く'),
    ('げ', 'ぐ'),
    ('せ', 'す'),
    ('て', 'つ'),
    ('ね', 'ぬ'),
    ('べ', 'ぶ'),
    ('め', 'む'),
    ('れ', 'る'),
    ('え', 'う'),
];

const SURU_FORMS: &[&str] = &[
    "します",
    "しました",
    "しません",
    "しませんでした",
    "した",
    "して",
    "しない",
    "しなかった",
];

const KURU_FORMS: &[&str] = &[
    "来ます",
    "来ました",
    "来ません",
    "来ませんでした",
    "来た",
    "来て",
    "来ない",
    "きます",
    "きました",
    "きません",
    "きませんでした",
    "きた",
    "きて",
    "こない",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeconjugationResult {
    pub base_form: String,
    pub conjugation_type: &'static str,
}

impl DeconjugationResult {
    fn new(base_form: String, conjugation_type: &'static str) -> Self {
        Self {
            base_form,
            conjugation_type,
        }
    }
}

/// Recovers dictionary forms from conjugated verbs and verb phrases.
///
/// Every candidate it builds from tables is checked against the tokenizer
/// when one is available; without a tokenizer the table result is used.
pub struct JapaneseDeconjugator;

impl Default for JapaneseDeconjugator {
    fn default() -> Self {
        Self::new()
    }
}

impl JapaneseDeconjugator {
    pub fn new() -> Self {
        Self
    }

    /// Possible dictionary forms of a polite or irregular verb, most likely first
    pub fn polite_candidates(&self, word: &str) -> Vec<DeconjugationResult> {
        if SURU_FORMS.contains(&word) {
            return vec![DeconjugationResult::new("する".into(), "irregular verb する")];
        }
        if KURU_FORMS.contains(&word) {
            return vec![DeconjugationResult::new("来る".into(), "irregular verb 来る")];
        }

        let Some(stem) = POLITE_SUFFIXES
            .iter()
            .find_map(|suffix| word.strip_suffix(suffix))
            .filter(|stem| !stem.is_empty())
        else {
            return Vec::new();
        };

        let mut results = Vec::with_capacity(2);
        if let Some(godan) = replace_last(stem, MASU_STEM_ENDINGS) {
            results.push(DeconjugationResult::new(godan, "godan verb, masu-form"));
        }
        results.push(DeconjugationResult::new(
            format!("{stem}る"),
            "ichidan verb, masu-form",
        ));
        results
    }

    /// Dictionary form of a polite verb. The first candidate the tokenizer
    /// confirms wins, otherwise the table's first guess; words that are
    /// not polite forms come back unchanged.
    pub fn strip_polite(&self, word: &str, tokenizer: Option<&dyn Tokenizer>) -> String {
        let candidates = self.polite_candidates(word);
        if let Some(tokenizer) = tokenizer {
            if let Some(valid) = candidates
                .iter()
                .find(|c| is_valid_verb_base(&c.base_form, tokenizer))
            {
                tracing::debug!("{} -> {} ({})", word, valid.base_form, valid.conjugation_type);
                return valid.base_form.clone();
            }
        }
        candidates
            .into_iter()
            .next()
            .map(|c| c.base_form)
            .unwrap_or_else(|| word.to_string())
    }

    /// Turn a potential-looking base (書ける) into the plain verb (書く) when
    /// the tokenizer accepts the result as a verb of its own.
    pub fn repair_verb_base(&self, base: &str, tokenizer: Option<&dyn Tokenizer>) -> String {
        let Some(tokenizer) = tokenizer else {
            return base.to_string();
        };
        let Some(candidate) = base
            .strip_suffix('る')
            .and_then(|stem| replace_last(stem, E_ROW_ENDINGS))
        else {
            return base.to_string();
        };

        if is_valid_verb_base(&candidate, tokenizer) {
            candidate
        } else {
            base.to_string()
        }
    }

    /// Base form of a whole selection: a verbal noun with its light verb,
    /// else the first verb, else the selection itself.
    pub fn selection_base_form(
        &self,
        tokens: &[Token],
        fallback: &str,
        tokenizer: Option<&dyn Tokenizer>,
    ) -> String {
        if let Some(base) = verbal_noun_base(tokens) {
            return base;
        }
        match tokens.iter().find(|t| is_verb(t)) {
            Some(verb) => self.verb_base(verb, fallback, tokenizer),
            None => fallback.to_string(),
        }
    }

    /// Base form of a clicked phrase span. The head verb is the last verb
    /// in the span; everything before it is kept as written and trailing
    /// auxiliaries are dropped (食べてしまいました → 食べてしまう).
    pub fn phrase_base_form(
        &self,
        span: &[Token],
        fallback: &str,
        tokenizer: Option<&dyn Tokenizer>,
    ) -> String {
        if let Some(base) = verbal_noun_base(span) {
            return base;
        }
        let Some(head) = span.iter().rposition(is_verb) else {
            return fallback.to_string();
        };
        if span[head].base_form.is_none() {
            return self.strip_polite(fallback, tokenizer);
        }

        let prefix: String = span[..head].iter().map(|t| t.surface.as_str()).collect();
        let base = self.verb_base(&span[head], fallback, tokenizer);
        format!("{prefix}{base}")
    }

    fn verb_base(&self, verb: &Token, fallback: &str, tokenizer: Option<&dyn Tokenizer>) -> String {
        match verb.base_form.as_deref() {
            Some(base) => self.repair_verb_base(base, tokenizer),
            None => self.strip_polite(fallback, tokenizer),
        }
    }
}

/// 勉強 + し(ます) → 勉強する
fn verbal_noun_base(tokens: &[Token]) -> Option<String> {
    let (noun, rest) = tokens.split_first()?;
    if is_sahen_noun(noun) && rest.iter().any(is_light_verb) {
        Some(format!("{}する", noun.surface))
    } else {
        None
    }
}

fn replace_last(stem: &str, table: &[(char, char)]) -> Option<String> {
    let mut chars = stem.chars();
    let last = chars.next_back()?;
    let (_, replacement) = table.iter().find(|(from, _)| *from == last)?;
    Some(format!("{}{replacement}", chars.as_str()))
}

/// `candidate` tokenizes as exactly one verb whose base or surface is the
/// candidate itself.
pub fn is_valid_verb_base(candidate: &str, tokenizer: &dyn Tokenizer) -> bool {
    match tokenizer.tokenize(candidate).as_slice() {
        [token] => {
            is_verb(token)
                && (token.base_form.as_deref() == Some(candidate) || token.surface == candidate)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::tests::{tabete_shimaimashita, tokens};
    use crate::tokenizer::PretokenizedTokenizer;
    use shiori_core::language::RawToken;

    fn verb(surface: &str) -> Vec<RawToken> {
        vec![RawToken {
            surface_form: Some(surface.into()),
            basic_form: Some(surface.into()),
            pos: Some("動詞".into()),
            pos_detail_1: Some("自立".into()),
            ..Default::default()
        }]
    }

    fn noun(surface: &str) -> Vec<RawToken> {
        vec![RawToken {
            surface_form: Some(surface.into()),
            basic_form: Some(surface.into()),
            pos: Some("名詞".into()),
            ..Default::default()
        }]
    }

    #[test]
    fn masu_stems_follow_the_table() {
        let d = JapaneseDeconjugator::new();
        let cases = [
            ("買います", "買う"),
            ("書きます", "書く"),
            ("泳ぎました", "泳ぐ"),
            ("話しません", "話す"),
            ("待ちませんでした", "待つ"),
            ("死にます", "死ぬ"),
            ("遊びましょう", "遊ぶ"),
            ("読みます", "読む"),
            ("帰ります", "帰る"),
            ("食べます", "食べる"),
        ];
        for (polite, plain) in cases {
            assert_eq!(d.strip_polite(polite, None), plain, "{polite}");
        }
    }

    #[test]
    fn irregular_forms() {
        let d = JapaneseDeconjugator::new();
        assert_eq!(d.strip_polite("しませんでした", None), "する");
        assert_eq!(d.strip_polite("きて", None), "来る");
        assert_eq!(d.strip_polite("こない", None), "来る");
        assert_eq!(d.strip_polite("ます", None), "ます");
        assert_eq!(d.strip_polite("猫", None), "猫");
    }

    #[test]
    fn tokenizer_picks_ichidan_over_table() {
        let mut tokenizer = PretokenizedTokenizer::default();
        tokenizer.insert("見る", verb("見る"));
        let d = JapaneseDeconjugator::new();
        // み maps to む by table, but 見む is not a verb
        assert_eq!(d.strip_polite("見ます", Some(&tokenizer)), "見る");
        assert_eq!(d.strip_polite("見ます", None), "見む");
    }

    #[test]
    fn repair_accepts_only_confirmed_verbs() {
        let mut tokenizer = PretokenizedTokenizer::default();
        tokenizer.insert("書く", verb("書く"));
        tokenizer.insert("食ぶ", noun("食ぶ"));
        let d = JapaneseDeconjugator::new();

        assert_eq!(d.repair_verb_base("書ける", Some(&tokenizer)), "書く");
        assert_eq!(d.repair_verb_base("食べる", Some(&tokenizer)), "食べる");
        assert_eq!(d.repair_verb_base("書ける", None), "書ける");
        assert_eq!(d.repair_verb_base("走る", Some(&tokenizer)), "走る");
    }

    #[test]
    fn phrase_keeps_te_chain() {
        let d = JapaneseDeconjugator::new();
        let span = tabete_shimaimashita();
        assert_eq!(d.phrase_base_form(&span, "食べてしまいました", None), "食べてしまう");
        assert_eq!(d.selection_base_form(&span, "食べてしまいました", None), "食べる");
    }

    #[test]
    fn verbal_noun_phrases() {
        let d = JapaneseDeconjugator::new();
        let span = tokens(
            "勉強しました",
            &[
                ("勉強", "勉強", "名詞", "サ変接続"),
                ("し", "する", "動詞", "自立"),
                ("まし", "ます", "助動詞", "*"),
                ("た", "た", "助動詞", "*"),
            ],
        );
        assert_eq!(d.phrase_base_form(&span, "勉強しました", None), "勉強する");

        let span = tokens(
            "勉強できた",
            &[
                ("勉強", "勉強", "名詞", "サ変接続"),
                ("でき", "できる", "動詞", "自立"),
                ("た", "た", "助動詞", "*"),
            ],
        );
        assert_eq!(d.selection_base_form(&span, "勉強できた", None), "勉強する");
    }

    #[test]
    fn verb_without_base_uses_polite_stripper() {
        let d = JapaneseDeconjugator::new();
        let span = tokens(
            "帰ります",
            &[("帰り", "*", "動詞", "自立"), ("ます", "ます", "助動詞", "*")],
        );
        assert_eq!(d.phrase_base_form(&span, "帰ります", None), "帰る");
    }

    #[test]
    fn no_verb_returns_fallback() {
        let d = JapaneseDeconjugator::new();
        let span = tokens("猫", &[("猫", "猫", "名詞", "一般")]);
        assert_eq!(d.phrase_base_form(&span, "猫", None), "猫");
        assert_eq!(d.selection_base_form(&[], "ねこ", None), "ねこ");
    }
}
