use shiori_config::Config;
use shiori_selection::{EngineError, SelectionEngine};

pub struct AppState {
    pub config: Config,
    pub engine: SelectionEngine,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let engine = SelectionEngine::from_config(&config)?;
        Ok(Self { config, engine })
    }
}
