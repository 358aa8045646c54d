use std::sync::Arc;

use shiori_config::Config;
use shiori_config::selection::SelectionConfig;
use shiori_config::tokenizer::TokenizerBackend;
use shiori_core::classify::classify;
use shiori_core::language::{Language, UnsupportedLanguage};
use shiori_core::preprocess::{Preprocessor, SelectionPreprocessor};
use shiori_core::types::{ClickedWord, LocalAnalysis, Mode, SelectionQuery, SelectionResult};
use shiori_lang_chinese::ChineseProcessor;
use shiori_lang_english::EnglishProcessor;
use shiori_lang_japanese::{
    JapaneseProcessor, LinderaLoader, PretokenizedLoader, SharedTokenizer, sentence_window,
};
use shiori_translator::{
    ChatClient, ChatTranslator, LocalHint, RefineRequest, Translator, TranslatorChain,
};

use crate::cache::CacheKey;
use crate::merger::{is_collectible, merge};
use crate::pipeline::RefinerPipeline;
use crate::session::DocumentSession;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Pretokenized backend selected but no pretokenized_path is set")]
    MissingPretokenizedPath,

    #[error("Invalid translation target: {0}")]
    InvalidTarget(#[from] UnsupportedLanguage),
}

/// Turns selections and clicks into structured analyses.
///
/// Holds no per-document state: the cache lives in the `DocumentSession`
/// passed to each call.
pub struct SelectionEngine {
    japanese: JapaneseProcessor,
    english: EnglishProcessor,
    chinese: ChineseProcessor,
    refiners: RefinerPipeline,
    translators: TranslatorChain,
    targets: Vec<Language>,
    settings: SelectionConfig,
}

impl SelectionEngine {
    pub fn new(
        tokenizer: SharedTokenizer,
        refiners: RefinerPipeline,
        translators: TranslatorChain,
        settings: SelectionConfig,
    ) -> Self {
        Self {
            japanese: JapaneseProcessor::new(tokenizer),
            english: EnglishProcessor::new(),
            chinese: ChineseProcessor::new(),
            refiners,
            translators,
            targets: Language::all().to_vec(),
            settings,
        }
    }

    pub fn with_targets(mut self, targets: Vec<Language>) -> Self {
        self.targets = targets;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let tokenizer = match config.tokenizer.backend {
            TokenizerBackend::Lindera => SharedTokenizer::new(LinderaLoader),
            TokenizerBackend::Pretokenized => {
                let path = config
                    .tokenizer
                    .pretokenized_path
                    .as_ref()
                    .ok_or(EngineError::MissingPretokenizedPath)?;
                SharedTokenizer::new(PretokenizedLoader::new(path))
            }
            TokenizerBackend::None => SharedTokenizer::disabled(),
        };

        let translators = if config.translator.enabled {
            TranslatorChain::new(
                config
                    .refiner
                    .usable_providers()
                    .map(|provider| {
                        Arc::new(ChatTranslator::new(ChatClient::new(provider.clone())))
                            as Arc<dyn Translator>
                    })
                    .collect(),
            )
        } else {
            TranslatorChain::default()
        };

        let targets = config
            .translator
            .targets
            .iter()
            .map(|code| code.parse::<Language>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(
            tokenizer,
            RefinerPipeline::from_config(&config.refiner),
            translators,
            config.selection.clone(),
        )
        .with_targets(targets))
    }

    pub fn settings(&self) -> &SelectionConfig {
        &self.settings
    }

    pub fn japanese(&self) -> &JapaneseProcessor {
        &self.japanese
    }

    pub async fn analyze_locally(&self, text: &str, language: Language) -> LocalAnalysis {
        match language {
            Language::Ja => self.japanese.analyze_locally(text).await,
            Language::En => self.english.analyze_locally(text),
            Language::Zh => self.chinese.analyze_locally(text),
        }
    }

    /// Analyze a drag selection, consulting and filling the session cache.
    /// `None` means the selection is not a usable lexical item.
    pub async fn analyze_selection(
        &self,
        query: &SelectionQuery,
        session: &mut DocumentSession,
    ) -> Option<SelectionResult> {
        let text = SelectionPreprocessor.process(&query.text, self.settings.max_query_chars);
        if text.is_empty() {
            return None;
        }
        let context =
            SelectionPreprocessor.process(&query.context, self.settings.max_context_chars);
        let language = query.language;

        let key = CacheKey::new(language, &text, &context);
        if let Some(cached) = session.cache.get(&key) {
            tracing::debug!("Selection cache hit for '{}'", text);
            return cached.clone();
        }

        let mode = classify(&text, language);
        let local = self.analyze_locally(&text, language).await;
        let min_confidence = self.settings.min_confidence;
        if !is_collectible(&text, language, mode, Some(local.confidence), min_confidence) {
            tracing::debug!("'{}' is not a collectible {:?} selection", text, mode);
            return None;
        }

        let remote = if mode == Mode::Phrase && language != Language::Zh {
            let hint = LocalHint {
                surface: local.surface.clone(),
                base_form: local.base_form.clone(),
                hiragana: local.reading.clone(),
                phonetics: local.phonetics.clone(),
            };
            let request = RefineRequest {
                text: &text,
                context: &context,
                language,
                hint: Some(&hint),
            };
            self.refiners.refine(&request).await
        } else {
            None
        };

        let mut result = merge(&text, language, mode, &local, remote.as_ref());
        if remote.is_some() && result.confidence < min_confidence {
            tracing::debug!(
                "'{}' rejected by {} (confidence {:.2})",
                text,
                result.source.as_str(),
                result.confidence
            );
            session.cache.insert(key, None);
            return None;
        }

        self.fill_translations(&mut result).await;
        session.cache.insert(key, Some(result.clone()));
        Some(result)
    }

    async fn fill_translations(&self, result: &mut SelectionResult) {
        let text = if result.surface.is_empty() {
            result.query.clone()
        } else {
            result.surface.clone()
        };
        for &target in &self.targets {
            if result.translations.get(target).is_empty() {
                let translated = self
                    .translators
                    .translate_text(&text, result.language, target)
                    .await;
                result.translations.set(target, translated);
            }
        }
    }

    /// Resolve a click on the `token_index`-th token of `text`
    pub async fn resolve_clicked_word(
        &self,
        text: &str,
        token_index: usize,
        language: Language,
    ) -> ClickedWord {
        match language {
            Language::Ja => self.japanese.resolve_clicked_word(text, token_index).await,
            Language::En => self.english.resolve_clicked_word(text, token_index),
            Language::Zh => self.chinese.resolve_clicked_word(text, token_index),
        }
    }

    /// Resolve a click at char offsets `[start, end)` of `text`
    pub async fn resolve_click_at(
        &self,
        text: &str,
        start: usize,
        end: usize,
        language: Language,
    ) -> ClickedWord {
        match language {
            Language::Ja => self.japanese.resolve_click_at(text, start, end).await,
            Language::En => self.english.resolve_click_at(text, start, end),
            Language::Zh => self.chinese.resolve_click_at(text, start, end),
        }
    }

    /// Click inside an open document: Japanese is tokenized one sentence at a time
    pub async fn resolve_document_click(
        &self,
        session: &DocumentSession,
        start: usize,
        end: usize,
    ) -> ClickedWord {
        match session.language() {
            Language::Ja => {
                let window = sentence_window(session.text(), start, end);
                self.resolve_click_at(&window.text, window.start, window.end, Language::Ja)
                    .await
            }
            language => {
                self.resolve_click_at(session.text(), start, end, language)
                    .await
            }
        }
    }
}
