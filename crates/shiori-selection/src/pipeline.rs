use std::sync::Arc;

use shiori_config::refiner::RefinerConfig;
use shiori_core::types::Source;
use shiori_translator::{ChatClient, ChatRefiner, RefineRequest, Refiner, RemoteCandidate};

/// Refiners in priority order; the first usable candidate wins
#[derive(Clone, Default)]
pub struct RefinerPipeline {
    refiners: Vec<Arc<dyn Refiner>>,
}

impl RefinerPipeline {
    pub fn new(refiners: Vec<Arc<dyn Refiner>>) -> Self {
        Self { refiners }
    }

    /// One chat refiner per provider that has an API key
    pub fn from_config(config: &RefinerConfig) -> Self {
        if !config.enabled {
            return Self::default();
        }

        let refiners = config
            .usable_providers()
            .filter_map(|provider| match Source::provider(&provider.name) {
                Some(source) => Some(Arc::new(ChatRefiner::new(
                    ChatClient::new(provider.clone()),
                    source,
                )) as Arc<dyn Refiner>),
                None => {
                    tracing::warn!("Unknown refiner provider '{}', skipping", provider.name);
                    None
                }
            })
            .collect::<Vec<_>>();

        tracing::info!("Refiner pipeline: {} provider(s)", refiners.len());
        Self { refiners }
    }

    pub fn is_empty(&self) -> bool {
        self.refiners.is_empty()
    }

    /// Failures are logged and fall through to the next provider
    pub async fn refine(&self, request: &RefineRequest<'_>) -> Option<RemoteCandidate> {
        for refiner in &self.refiners {
            match refiner.refine(request).await {
                Ok(candidate) => {
                    tracing::debug!(
                        "[{}] refined '{}' as '{}'",
                        refiner.source().as_str(),
                        request.text,
                        candidate.surface
                    );
                    return Some(candidate);
                }
                Err(e) => {
                    tracing::warn!("[{}] selection refinement failed: {}", refiner.source().as_str(), e);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::{FakeRefiner, candidate};
    use shiori_config::refiner::ProviderConfig;
    use shiori_core::language::Language;

    #[tokio::test]
    async fn first_success_wins() {
        let failing = FakeRefiner::new(Err(()));
        let good = FakeRefiner::new(Ok(candidate("気になる", "気になる", 0.8)));
        let unused = FakeRefiner::new(Ok(candidate("x", "x", 0.8)));
        let pipeline = RefinerPipeline::new(vec![
            failing.clone() as Arc<dyn Refiner>,
            good.clone(),
            unused.clone(),
        ]);

        let request = RefineRequest {
            text: "気に なる",
            context: "",
            language: Language::Ja,
            hint: None,
        };
        let result = pipeline.refine(&request).await.unwrap();
        assert_eq!(result.surface, "気になる");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(unused.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn keyless_and_unknown_providers_are_skipped() {
        let mut keyed = ProviderConfig::groq_from_env();
        keyed.api_key = "k".into();
        let mut keyless = ProviderConfig::deepseek_from_env();
        keyless.api_key = String::new();
        let mut unknown = keyed.clone();
        unknown.name = "other".into();

        let config = RefinerConfig {
            enabled: true,
            providers: vec![keyless, keyed.clone(), unknown],
        };
        assert_eq!(RefinerPipeline::from_config(&config).refiners.len(), 1);

        let disabled = RefinerConfig {
            enabled: false,
            providers: vec![keyed],
        };
        assert!(RefinerPipeline::from_config(&disabled).is_empty());
    }
}
