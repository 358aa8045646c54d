use shiori_core::classify::{is_cjk_phrase_shape, is_english_phrase_shape, is_single_word};
use shiori_core::language::Language;
use shiori_core::types::{LocalAnalysis, Mode, SelectionResult, Source, Translations};
use shiori_lang_japanese::normalize_phonetic;
use shiori_translator::RemoteCandidate;

pub const MIN_CONFIDENCE: f32 = 0.45;

/// Result built from local analysis alone
pub fn local_result(
    query: &str,
    language: Language,
    mode: Mode,
    local: &LocalAnalysis,
) -> SelectionResult {
    SelectionResult {
        query: query.to_string(),
        language,
        mode,
        surface: local.surface.clone(),
        base_form: local.base_form.clone(),
        reading: local.reading.clone(),
        phonetics: local.phonetics.clone(),
        translations: Translations::default(),
        confidence: local.confidence,
        source: Source::Local,
    }
}

/// Field by field, a non-empty remote value replaces the local one. The
/// result is attributed to the provider as soon as any field came from it.
pub fn merge(
    query: &str,
    language: Language,
    mode: Mode,
    local: &LocalAnalysis,
    remote: Option<&RemoteCandidate>,
) -> SelectionResult {
    let mut result = local_result(query, language, mode, local);
    let Some(remote) = remote else {
        return result;
    };

    let mut from_remote = false;
    let mut take = |field: &mut String, value: &str| {
        let value = value.trim();
        if !value.is_empty() {
            *field = value.to_string();
            from_remote = true;
        }
    };

    take(&mut result.surface, &remote.surface);
    take(&mut result.base_form, &remote.base_form);
    take(&mut result.reading, &normalize_phonetic(&remote.hiragana));
    take(&mut result.phonetics, &remote.phonetics);
    take(&mut result.translations.zh, &remote.translations.zh);
    take(&mut result.translations.en, &remote.translations.en);
    take(&mut result.translations.ja, &remote.translations.ja);

    if remote.confidence.is_finite() && remote.confidence > 0.0 {
        result.confidence = remote.confidence;
        from_remote = true;
    }
    if from_remote {
        result.source = remote.source;
    }
    result
}

/// Whether a selection is worth keeping as a vocabulary item
pub fn is_collectible(
    text: &str,
    language: Language,
    mode: Mode,
    confidence: Option<f32>,
    min_confidence: f32,
) -> bool {
    let confident = confidence.is_none_or(|c| !c.is_finite() || c >= min_confidence);
    match (language, mode) {
        (Language::En, _) if is_single_word(text, Language::En) => true,
        (Language::En, Mode::Phrase) => is_english_phrase_shape(text) && confident,
        (Language::En, Mode::Word) => false,
        (_, Mode::Word) => is_single_word(text, language) || is_cjk_phrase_shape(text),
        (_, Mode::Phrase) => is_cjk_phrase_shape(text) && confident,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(surface: &str, confidence: f32) -> LocalAnalysis {
        LocalAnalysis {
            surface: surface.to_string(),
            base_form: surface.to_string(),
            reading: String::new(),
            phonetics: String::new(),
            confidence,
        }
    }

    fn remote(surface: &str, confidence: f32) -> RemoteCandidate {
        RemoteCandidate {
            surface: surface.to_string(),
            base_form: String::new(),
            hiragana: String::new(),
            phonetics: String::new(),
            translations: Translations::default(),
            confidence,
            source: Source::Groq,
        }
    }

    #[test]
    fn remote_fields_take_precedence() {
        let merged = merge(
            "A",
            Language::En,
            Mode::Phrase,
            &local("A", 0.8),
            Some(&remote("B", 0.7)),
        );
        assert_eq!(merged.surface, "B");
        assert_eq!(merged.base_form, "A");
        assert_eq!(merged.confidence, 0.7);
        assert_eq!(merged.source, Source::Groq);
    }

    #[test]
    fn remote_surface_with_zero_confidence_keeps_local_confidence() {
        let merged = merge(
            "A",
            Language::En,
            Mode::Phrase,
            &local("A", 0.7),
            Some(&remote("B", 0.0)),
        );
        assert_eq!(merged.surface, "B");
        assert_eq!(merged.confidence, 0.7);
        assert_eq!(merged.source, Source::Groq);
    }

    #[test]
    fn empty_remote_keeps_local_source() {
        let merged = merge(
            "A",
            Language::En,
            Mode::Phrase,
            &local("A", 0.8),
            Some(&remote("  ", 0.0)),
        );
        assert_eq!(merged.surface, "A");
        assert_eq!(merged.confidence, 0.8);
        assert_eq!(merged.source, Source::Local);
    }

    #[test]
    fn confidence_alone_attributes_remote() {
        let merged = merge(
            "A",
            Language::En,
            Mode::Phrase,
            &local("A", 0.8),
            Some(&remote("", 0.3)),
        );
        assert_eq!(merged.confidence, 0.3);
        assert_eq!(merged.source, Source::Groq);
    }

    #[test]
    fn remote_reading_is_hiragana() {
        let mut candidate = remote("", 0.0);
        candidate.hiragana = "キニナル".into();
        let merged = merge("気に なる", Language::Ja, Mode::Phrase, &local("気に なる", 0.72), Some(&candidate));
        assert_eq!(merged.reading, "きになる");

        candidate.hiragana = "kininaru".into();
        let merged = merge("気に なる", Language::Ja, Mode::Phrase, &local("気に なる", 0.72), Some(&candidate));
        assert_eq!(merged.reading, "");
        assert_eq!(merged.source, Source::Local);
    }

    #[test]
    fn collectibility() {
        assert!(is_collectible("running", Language::En, Mode::Word, None, MIN_CONFIDENCE));
        assert!(is_collectible("take off", Language::En, Mode::Phrase, Some(0.8), MIN_CONFIDENCE));
        assert!(!is_collectible("take off", Language::En, Mode::Phrase, Some(0.3), MIN_CONFIDENCE));
        assert!(!is_collectible(
            "one two three four five six seven",
            Language::En,
            Mode::Phrase,
            Some(0.8),
            MIN_CONFIDENCE
        ));
        assert!(is_collectible("気に なる", Language::Ja, Mode::Phrase, Some(0.72), MIN_CONFIDENCE));
        assert!(!is_collectible("食べた。寝た", Language::Ja, Mode::Phrase, Some(0.72), MIN_CONFIDENCE));
        assert!(is_collectible("学习", Language::Zh, Mode::Word, None, MIN_CONFIDENCE));
    }
}
