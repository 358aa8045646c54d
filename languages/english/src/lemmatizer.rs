//! Suffix-stripping lemmatizer for single English words.
//!
//! Rules are tried in order and the first match wins. Irregular forms
//! (went, mice, ...) are not handled.

/// Doubled consonants that belong to the stem (fall, miss, buzz, stuff)
const KEPT_DOUBLES: &[char] = &['l', 's', 'z', 'f'];
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
const SIBILANT_ES: &[&str] = &["ses", "xes", "zes", "ches", "shes"];

pub struct EnglishLemmatizer;

impl Default for EnglishLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishLemmatizer {
    pub fn new() -> Self {
        Self
    }

    pub fn lemmatize(&self, word: &str) -> String {
        let w = word.trim().to_lowercase();
        let len = w.chars().count();

        if len > 2 {
            if let Some(stem) = w.strip_suffix("'s") {
                return stem.to_string();
            }
        }
        if len > 4 {
            if let Some(stem) = w.strip_suffix("ies") {
                return format!("{stem}y");
            }
        }
        if len > 5 {
            if let Some(stem) = w.strip_suffix("ing") {
                return undouble(stem);
            }
        }
        if len > 4 {
            if let Some(stem) = w.strip_suffix("ed") {
                return undouble(stem);
            }
            if SIBILANT_ES.iter().any(|suffix| w.ends_with(suffix)) {
                return w[..w.len() - 2].to_string();
            }
        }
        if len > 3 {
            if let Some(stem) = w.strip_suffix('s') {
                return stem.to_string();
            }
        }
        w
    }
}

/// runn → run, stopp → stop; fall, see and miss are left alone
fn undouble(stem: &str) -> String {
    let mut rev = stem.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(last), Some(prev))
            if last == prev && !VOWELS.contains(&last) && !KEPT_DOUBLES.contains(&last) =>
        {
            stem[..stem.len() - last.len_utf8()].to_string()
        }
        _ => stem.to_string(),
    }
}
