pub mod classify;
pub mod error;
pub mod language;
pub mod preprocess;
pub mod types;
