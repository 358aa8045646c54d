//! Morphological tokenizers and the lazily-initialized shared instance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use lindera::dictionary::{DictionaryKind, load_dictionary_from_kind};
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use shiori_core::error::TokenizerError;
use shiori_core::language::{RawToken, Token, Tokenizer, TokenizerLoader, assign_offsets};
use tokio::sync::OnceCell;

/// Tokenizer built on first use and shared by every caller afterwards.
///
/// Concurrent first callers wait on the same initialization. A failed load
/// leaves the cell empty, so the next call tries again.
pub struct SharedTokenizer {
    loader: Option<Box<dyn TokenizerLoader>>,
    cell: OnceCell<Arc<dyn Tokenizer>>,
}

impl SharedTokenizer {
    pub fn new(loader: impl TokenizerLoader + 'static) -> Self {
        Self {
            loader: Some(Box::new(loader)),
            cell: OnceCell::new(),
        }
    }

    /// Already-built tokenizer, mostly for tests
    pub fn ready(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            loader: None,
            cell: OnceCell::new_with(Some(tokenizer)),
        }
    }

    /// No tokenizer at all; Japanese analysis degrades to literals
    pub fn disabled() -> Self {
        Self {
            loader: None,
            cell: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn try_get(&self) -> Result<Arc<dyn Tokenizer>, TokenizerError> {
        let Some(loader) = self.loader.as_ref() else {
            return self
                .cell
                .get()
                .cloned()
                .ok_or_else(|| TokenizerError::ResourceNotFound("no tokenizer configured".into()));
        };

        let tokenizer = self.cell.get_or_try_init(|| loader.load()).await?;
        Ok(tokenizer.clone())
    }

    /// Like `try_get`, but a load failure is logged and reported as absence
    pub async fn get(&self) -> Option<Arc<dyn Tokenizer>> {
        match self.try_get().await {
            Ok(tokenizer) => Some(tokenizer),
            Err(e) => {
                if self.loader.is_some() {
                    tracing::warn!("Tokenizer unavailable: {}", e);
                }
                None
            }
        }
    }
}

/// In-process morphological analysis over the embedded IPADIC dictionary
pub struct LinderaTokenizer {
    inner: lindera::tokenizer::Tokenizer,
}

impl LinderaTokenizer {
    /// Builds the segmenter; this decodes the whole dictionary, so callers
    /// on the runtime go through `LinderaLoader` instead.
    pub fn ipadic() -> Result<Self, TokenizerError> {
        let dictionary = load_dictionary_from_kind(DictionaryKind::IPADIC)
            .map_err(|e| TokenizerError::ResourceLoad(format!("IPADIC: {e}")))?;
        let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
        Ok(Self {
            inner: lindera::tokenizer::Tokenizer::new(segmenter),
        })
    }
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = match self.inner.tokenize(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!("lindera failed on {:?}: {}", text, e);
                return Vec::new();
            }
        };

        let raws = tokens
            .iter_mut()
            .filter_map(|token| {
                let surface = text.get(token.byte_start..token.byte_end)?;
                if surface.trim().is_empty() {
                    return None;
                }
                Some(ipadic_raw_token(surface, &token.details()))
            })
            .collect();

        assign_offsets(text, raws)
    }
}

/// Map IPADIC features
/// `pos,pos1,pos2,pos3,ctype,cform,base,reading,pron` onto a raw token.
/// Unknown words carry fewer fields; missing ones stay empty.
pub fn ipadic_raw_token(surface: &str, features: &[&str]) -> RawToken {
    let field = |i: usize| features.get(i).map(|s| s.to_string());

    RawToken {
        surface_form: Some(surface.to_string()),
        pos: field(0),
        pos_detail_1: field(1),
        basic_form: field(6),
        reading: field(7),
        word_position: None,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LinderaLoader;

#[async_trait]
impl TokenizerLoader for LinderaLoader {
    async fn load(&self) -> Result<Arc<dyn Tokenizer>, TokenizerError> {
        let tokenizer = tokio::task::spawn_blocking(LinderaTokenizer::ipadic)
            .await
            .map_err(|e| TokenizerError::ResourceLoad(format!("dictionary task failed: {e}")))??;

        tracing::info!("Loaded embedded IPADIC dictionary");
        Ok(Arc::new(tokenizer))
    }
}

/// Serves tokenizations captured ahead of time, keyed by the exact text.
/// Text that was never captured tokenizes to nothing.
#[derive(Debug, Default)]
pub struct PretokenizedTokenizer {
    entries: HashMap<String, Vec<RawToken>>,
}

impl PretokenizedTokenizer {
    pub fn from_json(json: &str) -> Result<Self, TokenizerError> {
        let entries: HashMap<String, Vec<RawToken>> = serde_json::from_str(json)
            .map_err(|e| TokenizerError::InvalidFormat(e.to_string()))?;
        Ok(Self { entries })
    }

    pub fn insert(&mut self, text: impl Into<String>, tokens: Vec<RawToken>) {
        self.entries.insert(text.into(), tokens);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Tokenizer for PretokenizedTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        match self.entries.get(text) {
            Some(raws) => assign_offsets(text, raws.clone()),
            None => Vec::new(),
        }
    }
}

pub struct PretokenizedLoader {
    path: PathBuf,
}

impl PretokenizedLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TokenizerLoader for PretokenizedLoader {
    async fn load(&self) -> Result<Arc<dyn Tokenizer>, TokenizerError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TokenizerError::ResourceNotFound(self.path.display().to_string())
            } else {
                TokenizerError::IoError(e)
            }
        })?;
        let tokenizer = PretokenizedTokenizer::from_json(&json)?;
        tracing::info!(
            "Loaded {} pretokenized entries from {}",
            tokenizer.len(),
            self.path.display()
        );
        Ok(Arc::new(tokenizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn maps_ipadic_features() {
        let raw = ipadic_raw_token(
            "食べ",
            &["動詞", "自立", "*", "*", "一段", "連用形", "食べる", "タベ", "タベ"],
        );
        assert_eq!(raw.basic_form.as_deref(), Some("食べる"));
        assert_eq!(raw.reading.as_deref(), Some("タベ"));
        assert_eq!(raw.pos_detail_1.as_deref(), Some("自立"));

        let unknown = ipadic_raw_token("ほげ", &["名詞", "一般", "*", "*", "*", "*", "*"]);
        assert_eq!(unknown.reading, None);

        let tokens = assign_offsets("食べてほげ", vec![raw, unknown]);
        assert_eq!(tokens[1].start, 3);
        assert_eq!(tokens[1].base_form, None);
    }

    #[tokio::test]
    async fn embedded_dictionary_splits_verb_phrase() {
        let tokenizer = LinderaLoader.load().await.unwrap();
        let tokens = tokenizer.tokenize("食べてしまいました");
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, ["食べ", "て", "しまい", "まし", "た"]);
        assert_eq!(tokens[0].base_form.as_deref(), Some("食べる"));
        assert_eq!(tokens[0].pos, "動詞");
        assert_eq!(tokens[2].base_form.as_deref(), Some("しまう"));
        assert_eq!(tokens[4].start, 8);
    }

    #[tokio::test]
    async fn long_documents_tokenize_in_process() {
        let tokenizer = LinderaLoader.load().await.unwrap();
        let document = "雨が降ったので家にいた。\n".repeat(8_000);
        let tokens = tokenizer.tokenize(&document);
        assert!(!tokens.is_empty());
        let last = tokens.last().unwrap();
        assert_eq!(last.end(), document.chars().count() - 1);
    }

    #[test]
    fn pretokenized_unknown_text_is_empty() {
        let json = r#"{"走る": [{"surface_form":"走る","basic_form":"走る","pos":"動詞","reading":"ハシル"}]}"#;
        let tokenizer = PretokenizedTokenizer::from_json(json).unwrap();
        assert_eq!(tokenizer.tokenize("走る").len(), 1);
        assert!(tokenizer.tokenize("歩く").is_empty());
        assert!(matches!(
            PretokenizedTokenizer::from_json("[]"),
            Err(TokenizerError::InvalidFormat(_))
        ));
    }

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        fail_first: bool,
    }

    #[async_trait]
    impl TokenizerLoader for CountingLoader {
        async fn load(&self) -> Result<Arc<dyn Tokenizer>, TokenizerError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_first && call == 0 {
                return Err(TokenizerError::ResourceLoad("first load fails".into()));
            }
            Ok(Arc::new(PretokenizedTokenizer::default()))
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let shared = SharedTokenizer::new(CountingLoader {
            calls: calls.clone(),
            fail_first: false,
        });

        let (a, b) = tokio::join!(shared.get(), shared.get());
        assert!(a.is_some() && b.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(shared.is_initialized());
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let shared = SharedTokenizer::new(CountingLoader {
            calls: calls.clone(),
            fail_first: true,
        });

        assert!(shared.get().await.is_none());
        assert!(!shared.is_initialized());
        assert!(shared.get().await.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_has_no_tokenizer() {
        let shared = SharedTokenizer::disabled();
        assert!(matches!(
            shared.try_get().await,
            Err(TokenizerError::ResourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn missing_pretokenized_file() {
        let loader = PretokenizedLoader::new("/nonexistent/shiori-tokens.json");
        assert!(matches!(
            loader.load().await,
            Err(TokenizerError::ResourceNotFound(_))
        ));
    }
}
