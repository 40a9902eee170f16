//! Context lookup: which sentences of a document contain a bigram.
//!
//! Matching is a case-insensitive substring test for `"w1 w2"`, not a
//! token-boundary match, so `("cat", "sat")` also matches `"concat sated"`.

use colloc_types::{Bigram, ContextRecord};
use memchr::memmem::Finder;
use tracing::trace;

use crate::analyzer::sentence::SentenceSplitter;
use crate::collocation::types::BigramAnalyzer;

/// Finds the sentences containing `target`.
///
/// Sentences are indexed from zero in the order given. Each matching
/// sentence is reported once, in its original case.
pub fn locate<S: AsRef<str>>(sentences: &[S], target: &Bigram) -> ContextRecord {
    let needle = target.phrase().to_lowercase();
    let finder = Finder::new(needle.as_bytes());
    let mut record = ContextRecord::default();

    for (idx, sentence) in sentences.iter().enumerate() {
        let sentence = sentence.as_ref();
        // same folding as the needle, including word-final sigma
        let lowered = sentence.to_lowercase();

        if finder.find(lowered.as_bytes()).is_some() {
            record.occurrences += 1;
            record.sentences.push(sentence.to_owned());
            record.positions.push(idx);
        }
    }

    trace!(target_phrase = %target, matches = record.occurrences, "located context");
    record
}

impl BigramAnalyzer {
    /// Splits `text` into sentences and locates `target` among them.
    pub fn analyze_context(&self, text: &str, target: &Bigram) -> ContextRecord {
        let mut sentences = Vec::new();
        SentenceSplitter.split_with(text, |s| sentences.push(s));
        locate(&sentences, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_sentence() {
        let record = locate(
            &["The cat sat.", "The cat ran far."],
            &Bigram::new("cat", "sat"),
        );
        assert_eq!(record.occurrences, 1);
        assert_eq!(record.positions, vec![0]);
        assert_eq!(record.sentences, vec!["The cat sat."]);
    }

    #[test]
    fn case_insensitive_original_case_kept() {
        let record = locate(&["THE CAT sat", "no match"], &Bigram::new("the", "cat"));
        assert_eq!(record.sentences, vec!["THE CAT sat"]);
    }

    #[test]
    fn final_sigma_folds_like_the_target() {
        let record = locate(&["ΟΔΟΣ ΜΑΣ."], &Bigram::new("ΟΔΟΣ", "ΜΑΣ"));
        assert_eq!(record.occurrences, 1);
        assert_eq!(record.positions, vec![0]);

        let record = locate(&["Η ΟΔΟΣ ΜΑΣ είναι"], &Bigram::new("οδος", "μας"));
        assert_eq!(record.occurrences, 1);
    }

    #[test]
    fn one_entry_per_sentence() {
        let record = locate(&["new york, new york"], &Bigram::new("new", "york"));
        assert_eq!(record.occurrences, 1);
    }

    #[test]
    fn substring_match_is_not_boundary_aware() {
        let record = locate(&["concat sated"], &Bigram::new("cat", "sat"));
        assert_eq!(record.occurrences, 1);
    }

    #[test]
    fn no_match_is_empty() {
        let record = locate(&["nothing here"], &Bigram::new("cat", "sat"));
        assert!(record.is_empty());
        assert!(record.sentences.is_empty());
        assert!(record.positions.is_empty());

        let none: [&str; 0] = [];
        assert!(locate(&none, &Bigram::new("a", "b")).is_empty());
    }

    #[test]
    fn analyze_context_splits_text() {
        let analyzer = BigramAnalyzer::new();
        let record =
            analyzer.analyze_context("The cat sat. The dog ran. A cat sat down.", &Bigram::new("cat", "sat"));
        assert_eq!(record.occurrences, 2);
        assert_eq!(record.positions, vec![0, 2]);
        assert_eq!(record.sentences, vec!["The cat sat.", "A cat sat down."]);
    }
}
