//! IPADIC part-of-speech tags used by the phrase heuristics.

pub const VERB: &str = "動詞";
pub const NOUN: &str = "名詞";
pub const AUXILIARY: &str = "助動詞";
pub const PARTICLE: &str = "助詞";

/// Noun detail for nouns that take する (勉強, 確認, ...)
pub const SAHEN_CONNECTION: &str = "サ変接続";
/// Verb details marking bound forms (させる, しまう, ...)
pub const SUFFIX: &str = "接尾";
pub const DEPENDENT: &str = "非自立";
