use async_trait::async_trait;
use serde::Serialize;
use shiori_core::language::Language;
use shiori_core::types::Source;

use crate::chat::{ChatClient, ChatError, ChatMessage};
use crate::reply::{RemoteCandidate, ReplyError, parse_candidate};

/// Local best guess passed to the model as a hint
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalHint {
    pub surface: String,
    pub base_form: String,
    pub hiragana: String,
    pub phonetics: String,
}

#[derive(Debug, Clone)]
pub struct RefineRequest<'a> {
    pub text: &'a str,
    pub context: &'a str,
    pub language: Language,
    pub hint: Option<&'a LocalHint>,
}

#[derive(Debug, thiserror::Error)]
pub enum RefineError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] ChatError),

    #[error("Unusable reply: {0}")]
    Reply(#[from] ReplyError),
}

/// Structured phrase analysis backed by a language model
#[async_trait]
pub trait Refiner: Send + Sync {
    async fn refine(&self, request: &RefineRequest<'_>) -> Result<RemoteCandidate, RefineError>;

    /// Provider this refiner reports as the result source
    fn source(&self) -> Source;
}

pub struct ChatRefiner {
    client: ChatClient,
    source: Source,
}

impl ChatRefiner {
    pub fn new(client: ChatClient, source: Source) -> Self {
        Self { client, source }
    }
}

#[async_trait]
impl Refiner for ChatRefiner {
    async fn refine(&self, request: &RefineRequest<'_>) -> Result<RemoteCandidate, RefineError> {
        let messages = selection_messages(request);
        let provider = self.client.provider();
        let reply = self
            .client
            .complete(
                &provider.selection_model,
                &messages,
                provider.selection_max_tokens,
            )
            .await?;

        tracing::debug!("[{}] selection reply: {} chars", self.source.as_str(), reply.len());
        Ok(parse_candidate(&reply, self.source)?)
    }

    fn source(&self) -> Source {
        self.source
    }
}

const REPLY_SHAPE: &str = r#"{"surface":"...","baseForm":"...","hiragana":"...","phonetics":"...","translations":{"zh":"...","en":"...","ja":"..."},"confidence":0.0}"#;

pub fn selection_messages(request: &RefineRequest<'_>) -> Vec<ChatMessage> {
    let (role, rules) = match request.language {
        Language::Ja => (
            "You identify Japanese drag-selections.",
            "surface is the complete word or phrase; baseForm is the dictionary form; hiragana contains hiragana only; zh/en/ja are short and natural.",
        ),
        _ => (
            "You identify English drag-selections.",
            "surface is the complete word or phrase; baseForm is the lemmatized form; phonetics may hold a short IPA transcription; zh/en/ja are short and natural.",
        ),
    };

    let system = [
        role,
        "Output JSON only, no explanations and no markdown.",
        "The JSON must have exactly this shape:",
        REPLY_SHAPE,
        rules,
    ]
    .join("\n");

    let hint = request
        .hint
        .and_then(|hint| serde_json::to_string(hint).ok())
        .map(|json| format!("Local candidate: {json}"))
        .unwrap_or_default();
    let context = if request.context.is_empty() {
        "(none)"
    } else {
        request.context
    };
    let user = format!("Selected text: {}\nContext: {}\n{}", request.text, context, hint);

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
