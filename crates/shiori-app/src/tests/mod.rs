
use std::sync::Arc;

use shiori_config::Config;
use shiori_config::tokenizer::TokenizerBackend;

use crate::state::AppState;

/// Offline state: no tokenizer, no remote providers
pub(crate) fn offline_state() -> Arc<AppState> {
    let mut config = Config::default();
    config.tokenizer.backend = TokenizerBackend::None;
    config.refiner.enabled = false;
    config.translator.enabled = false;
    Arc::new(AppState::new(config).expect("offline config is valid"))
}
