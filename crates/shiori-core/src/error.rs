#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("Dictionary resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Failed to load dictionary resource: {0}")]
    ResourceLoad(String),

    #[error("Invalid dictionary format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
