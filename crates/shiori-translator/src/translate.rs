use std::sync::Arc;

use async_trait::async_trait;
use shiori_core::language::Language;

use crate::chat::{ChatClient, ChatMessage};
use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// Short translations through a chat completions provider
#[derive(Clone)]
pub struct ChatTranslator {
    client: ChatClient,
}

impl ChatTranslator {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<Translation, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let provider = self.client.provider();
        let clipped = clip(text, provider.translation_clip_chars);
        let messages = translation_messages(&clipped, from, to);
        let translated = self
            .client
            .complete(
                &provider.translation_model,
                &messages,
                provider.translation_max_tokens,
            )
            .await?;

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: provider.name.clone(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.client.provider().name.clone(),
            requires_api_key: true,
        }
    }
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn source_label(from: Language, to: Language) -> &'static str {
    match (to, from) {
        (Language::Ja, Language::Ja) => "日本語",
        (Language::Ja, Language::En) => "英語",
        (Language::Ja, Language::Zh) => "中国語",
        (Language::Zh, Language::Ja) => "日语",
        (Language::Zh, Language::En) => "英语",
        (Language::Zh, Language::Zh) => "中文",
        (Language::En, Language::Ja) => "Japanese",
        (Language::En, Language::En) => "English",
        (Language::En, Language::Zh) => "Chinese",
    }
}

/// Prompts are written in the target language
pub fn translation_messages(text: &str, from: Language, to: Language) -> Vec<ChatMessage> {
    let label = source_label(from, to);
    let (system, user) = match to {
        Language::En => (
            format!("You are a concise translator. Translate {label} text into natural English in one sentence."),
            format!("Translate to English: {text}"),
        ),
        Language::Ja => (
            format!("あなたは簡潔な翻訳アシスタントです。{label}の内容を自然な日本語に翻訳し、訳文のみを返してください。"),
            format!("日本語に翻訳してください：{text}"),
        ),
        Language::Zh => (
            format!("你是简洁的翻译助手。请把{label}内容翻译成自然中文，只输出译文。"),
            format!("请翻译为中文：{text}"),
        ),
    };
    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Ordered providers; the first non-empty translation wins
#[derive(Clone, Default)]
pub struct TranslatorChain {
    translators: Vec<Arc<dyn Translator>>,
}

impl TranslatorChain {
    pub fn new(translators: Vec<Arc<dyn Translator>>) -> Self {
        Self { translators }
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// Never fails: an empty string means no translation is available.
    /// Same-language requests return the input untouched.
    pub async fn translate_text(&self, text: &str, from: Language, to: Language) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }
        if from == to {
            return text.to_string();
        }

        for translator in &self.translators {
            match translator.translate(text, from, to).await {
                Ok(translation) if !translation.text.trim().is_empty() => {
                    return translation.text.trim().to_string();
                }
                Ok(_) => {
                    tracing::debug!("{} returned an empty translation", translator.metadata().name);
                }
                Err(e) => {
                    tracing::warn!("{} translation failed: {}", translator.metadata().name, e);
                }
            }
        }

        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        name: &'static str,
        reply: Result<&'static str, ()>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Translator for Fixed {
        async fn translate(
            &self,
            _text: &str,
            from: Language,
            to: Language,
        ) -> Result<Translation, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(text) => Ok(Translation {
                    text: text.to_string(),
                    from,
                    to,
                    provider: self.name.to_string(),
                }),
                Err(()) => Err(TranslateError::NoProvider),
            }
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: self.name.to_string(),
                requires_api_key: false,
            }
        }
    }

    fn fixed(name: &'static str, reply: Result<&'static str, ()>) -> Arc<Fixed> {
        Arc::new(Fixed {
            name,
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn falls_through_failures_and_blanks() {
        let failing = fixed("a", Err(()));
        let blank = fixed("b", Ok("  "));
        let good = fixed("c", Ok(" 吃 "));
        let chain = TranslatorChain::new(vec![
            failing.clone() as Arc<dyn Translator>,
            blank.clone(),
            good.clone(),
        ]);

        let text = chain.translate_text("食べる", Language::Ja, Language::Zh).await;
        assert_eq!(text, "吃");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(blank.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn same_language_is_identity() {
        let good = fixed("c", Ok("x"));
        let chain = TranslatorChain::new(vec![good.clone() as Arc<dyn Translator>]);
        assert_eq!(chain.translate_text("走る", Language::Ja, Language::Ja).await, "走る");
        assert_eq!(good.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_chain_yields_empty() {
        let chain = TranslatorChain::default();
        assert_eq!(chain.translate_text("run", Language::En, Language::Zh).await, "");
    }

    #[test]
    fn long_input_is_clipped() {
        let long = "あ".repeat(200);
        let clipped = clip(&long, 180);
        assert_eq!(clipped.chars().count(), 183);
        assert_eq!(clip("short", 180), "short");
    }
}
