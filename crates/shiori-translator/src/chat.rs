use serde::Serialize;
use shiori_config::refiner::ProviderConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Empty completion")]
    EmptyCompletion,
}

/// Minimal OpenAI-compatible chat completions client
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    provider: ProviderConfig,
}

impl ChatClient {
    pub fn new(provider: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider,
        }
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Send one completion request and return the first choice's content
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: Option<u32>,
    ) -> Result<String, ChatError> {
        if self.provider.api_key.is_empty() {
            return Err(ChatError::AuthenticationError);
        }

        let body = ChatRequest {
            model,
            messages,
            temperature: self.provider.temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&self.provider.chat_url)
            .bearer_auth(&self.provider.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(ChatError::RateLimitExceeded);
        }
        if status == 401 || status == 403 {
            return Err(ChatError::AuthenticationError);
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| ChatError::ApiError(format!("Failed to parse response: {e}")))?;

        let content = completion_content(&json).ok_or(ChatError::EmptyCompletion)?;
        Ok(content)
    }
}

/// `choices[0].message.content`, trimmed, if non-empty
pub fn completion_content(json: &serde_json::Value) -> Option<String> {
    json["choices"]
        .get(0)
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}
