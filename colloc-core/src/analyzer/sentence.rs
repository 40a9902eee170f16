//! Sentence splitting.
//!
//! The context locator works on whole sentences; this splitter provides them
//! using Unicode sentence boundaries (UAX #29).

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into trimmed, non-empty sentences.
///
/// Sentence text keeps its original case and inner spacing so that matches
/// can be reported back verbatim.
///
/// # Example
///
/// ```
/// use colloc_core::analyzer::sentence::SentenceSplitter;
///
/// let sentences = SentenceSplitter.split("The cat sat. The cat ran far.");
/// assert_eq!(sentences, vec!["The cat sat.", "The cat ran far."]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    /// Splits `text`, emitting each sentence slice via callback.
    #[inline]
    pub fn split_with<'t, F>(&self, text: &'t str, mut emit: F)
    where
        F: FnMut(&'t str),
    {
        for sentence in text.unicode_sentences() {
            let trimmed = sentence.trim();
            if !trimmed.is_empty() {
                emit(trimmed);
            }
        }
    }

    /// Splits `text` into owned sentences.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.split_with(text, |s| out.push(s.to_owned()));
        out
    }
}
