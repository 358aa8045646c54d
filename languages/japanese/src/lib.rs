pub mod click;
pub mod deconjugator;
pub mod phrase;
pub mod pos;
pub mod processor;
pub mod reading;
pub mod script;
pub mod tokenizer;

pub use click::{SentenceWindow, find_clicked_token_index, sentence_window};
pub use deconjugator::{DeconjugationResult, JapaneseDeconjugator};
pub use phrase::detect_verb_phrase;
pub use processor::JapaneseProcessor;
pub use reading::{Reading, build_reading};
pub use script::{katakana_to_hiragana, normalize_phonetic};
pub use tokenizer::{
    LinderaLoader, LinderaTokenizer, PretokenizedLoader, PretokenizedTokenizer, SharedTokenizer,
};
