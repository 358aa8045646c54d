use shiori_core::language::Language;

pub mod chat;
pub mod refiner;
pub mod reply;
pub mod translate;

pub use chat::{ChatClient, ChatError, ChatMessage};
pub use refiner::{ChatRefiner, LocalHint, RefineError, RefineRequest, Refiner};
pub use reply::{RemoteCandidate, ReplyError};
pub use translate::{ChatTranslator, TranslatorChain};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: Language,
    pub to: Language,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] ChatError),

    #[error("No provider configured")]
    NoProvider,

    #[error("Empty input")]
    EmptyInput,
}
