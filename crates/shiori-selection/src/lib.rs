pub mod cache;
pub mod engine;
pub mod guard;
pub mod merger;
pub mod pipeline;
pub mod session;

pub use cache::{CacheKey, SelectionCache};
pub use engine::{EngineError, SelectionEngine};
pub use guard::SelectionGuard;
pub use merger::{MIN_CONFIDENCE, is_collectible, merge};
pub use pipeline::RefinerPipeline;
pub use session::DocumentSession;
