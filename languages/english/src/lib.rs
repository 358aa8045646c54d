pub mod analyzer;
pub mod lemmatizer;

pub use analyzer::EnglishProcessor;
pub use lemmatizer::EnglishLemmatizer;
