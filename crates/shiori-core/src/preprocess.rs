use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Collapse whitespace runs, trim and truncate to `max_chars`
    fn process(&self, text: &str, max_chars: usize) -> String {
        let collapsed = collapse_whitespace(text);
        collapsed.chars().take(max_chars).collect()
    }
}

/// Selection text as captured from the reader
pub struct SelectionPreprocessor;
impl Preprocessor for SelectionPreprocessor {}

/// Clipboard or OCR text: NFKC folding before the default pass
pub struct NfkcPreprocessor;
impl Preprocessor for NfkcPreprocessor {
    fn process(&self, text: &str, max_chars: usize) -> String {
        let folded: String = text.nfkc().collect();
        collapse_whitespace(&folded).chars().take(max_chars).collect()
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every whitespace character
pub fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Surrounding text of a selection, `radius` chars on each side
pub fn selection_context(document: &str, start: usize, end: usize, radius: usize) -> String {
    let text = document.trim();
    if text.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let from = start.min(chars.len()).saturating_sub(radius);
    let to = end.saturating_add(radius).min(chars.len());
    if from >= to {
        return String::new();
    }
    let slice: String = chars[from..to].iter().collect();
    collapse_whitespace(&slice)
}
