pub mod analyzer;

pub use analyzer::ChineseProcessor;
