//! Word Tokenizer Module
//!
//! Reference implementation of the token contract the bigram engine consumes:
//! an ordered sequence of normalized word tokens.
//!
//! ## What It Does
//!
//! Given raw input like `"The cat sat. The cat ran!"` with
//! [`TokenizerConfig::keep_stopwords`], it produces:
//!
//! ```ignore
//! ["the", "cat", "sat", "the", "cat", "ran"]
//! ```
//!
//! ## Pipeline
//!
//! 1. **Normalize**: collapse whitespace, optionally lowercase ([`TextNormalizer`])
//! 2. **Segment**: split on Unicode word boundaries (UAX #29), dropping whitespace
//! 3. **Clitics**: split contractions into stem and clitic (`don't` -> `do`, `n't`)
//! 4. **Filter**: punctuation and stopword removal, per configuration
//!
//! With `remove_punctuation` enabled a token is dropped when it is pure
//! punctuation, contains an apostrophe, or has no alphabetic character. The
//! clitic half of a contraction always contains an apostrophe, so only the
//! stem reaches the bigram table: `"I don't know"` yields `i do know`.
//! Apostrophe words that are not contractions (`o'clock`) are dropped whole.
//!
//! ## The Output Contract
//!
//! Token order follows the source text. The engine never re-normalizes tokens,
//! so frequency and association results depend on the configuration used here.

use std::sync::OnceLock;

use colloc_types::TokenizerConfig;
use regex::Regex;
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
use crate::analyzer::stopwords::StopwordFilter;

fn alpha_run() -> &'static Regex {
    static ALPHA_RUN: OnceLock<Regex> = OnceLock::new();
    ALPHA_RUN.get_or_init(|| Regex::new(r"\b[a-zA-Z]+\b").expect("valid regex"))
}

#[inline]
fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

/// Clitics split off after an apostrophe; `n't` is handled separately.
const CLITICS: [&str; 6] = ["s", "m", "re", "ll", "ve", "d"];

/// Splits a contraction into `(stem, clitic)`.
///
/// `don't` splits before the `n` (`do`, `n't`), `it's` at the apostrophe
/// (`it`, `'s`). Returns `None` for segments that are not contractions.
fn split_clitic(segment: &str) -> Option<(&str, &str)> {
    let (idx, apostrophe) = segment.char_indices().rev().find(|&(_, c)| is_apostrophe(c))?;
    let stem = &segment[..idx];
    let tail = &segment[idx + apostrophe.len_utf8()..];

    if tail.eq_ignore_ascii_case("t")
        && stem.len() > 1
        && stem.as_bytes()[stem.len() - 1].eq_ignore_ascii_case(&b'n')
    {
        return Some(segment.split_at(stem.len() - 1));
    }
    if !stem.is_empty() && CLITICS.iter().any(|c| tail.eq_ignore_ascii_case(c)) {
        return Some(segment.split_at(idx));
    }
    None
}

/// Returns `true` if the segment survives punctuation filtering.
#[inline]
fn is_word(segment: &str) -> bool {
    !segment.chars().any(is_apostrophe) && segment.chars().any(char::is_alphabetic)
}

/// Configurable word tokenizer.
///
/// The tokenizer is cheap to reuse: the stopword set is built once at
/// construction and the normalization buffer is owned by the caller of
/// [`WordTokenizer::tokenize_into`].
///
/// ## Example
///
/// ```
/// use colloc_core::analyzer::tokenizer::WordTokenizer;
/// use colloc_types::TokenizerConfig;
///
/// let tokenizer = WordTokenizer::new(TokenizerConfig::keep_stopwords());
/// let tokens = tokenizer.tokenize("Grateful in everything, grateful in all.");
///
/// assert_eq!(tokens, vec!["grateful", "in", "everything", "grateful", "in", "all"]);
/// ```
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    config: TokenizerConfig,
    normalizer: TextNormalizer,
    stopwords: StopwordFilter,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl WordTokenizer {
    /// Creates a tokenizer with the English stopword list.
    pub fn new(config: TokenizerConfig) -> Self {
        let stopwords = if config.remove_stopwords {
            StopwordFilter::english()
        } else {
            StopwordFilter::empty()
        };
        Self::with_stopwords(config, stopwords)
    }

    /// Creates a tokenizer with a custom stopword filter.
    ///
    /// The filter is only consulted when `config.remove_stopwords` is set.
    pub fn with_stopwords(config: TokenizerConfig, stopwords: StopwordFilter) -> Self {
        Self {
            config,
            normalizer: TextNormalizer::new(NormalizerConfig {
                lowercase: config.lowercase,
            }),
            stopwords,
        }
    }

    /// Returns the configuration that produced this tokenizer's output.
    #[inline(always)]
    pub const fn config(&self) -> TokenizerConfig {
        self.config
    }

    /// Tokenizes raw text into owned tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut norm_buf = String::new();
        let mut tokens = Vec::new();
        self.tokenize_into(text, &mut norm_buf, |t| tokens.push(t.to_owned()));
        trace!(tokens = tokens.len(), "tokenized text");
        tokens
    }

    /// Tokenizes raw text, emitting each surviving token via callback.
    ///
    /// `norm_buf` is cleared and reused for the normalized text; tokens are
    /// slices of it.
    pub fn tokenize_into<'b, F>(&self, text: &str, norm_buf: &'b mut String, mut emit: F)
    where
        F: FnMut(&'b str),
    {
        self.normalizer.normalize_into(text, norm_buf);
        let normalized: &'b str = norm_buf.as_str();

        for segment in normalized.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            match split_clitic(segment) {
                Some((stem, clitic)) => {
                    self.filter(stem, &mut emit);
                    self.filter(clitic, &mut emit);
                }
                None => self.filter(segment, &mut emit),
            }
        }
    }

    #[inline]
    fn filter<'b, F>(&self, token: &'b str, emit: &mut F)
    where
        F: FnMut(&'b str),
    {
        if self.config.remove_punctuation && !is_word(token) {
            return;
        }
        if self.config.remove_stopwords && self.stopwords.is_stopword(token) {
            return;
        }
        emit(token);
    }

    /// Tokenizes on ASCII alphabetic runs only.
    ///
    /// Apostrophes split words (`don't` becomes `don`, `t`) and digits are
    /// discarded. Case folding and stopword removal follow the configuration.
    pub fn regexp_tokenize(&self, text: &str) -> Vec<String> {
        alpha_run()
            .find_iter(text)
            .map(|m| {
                if self.config.lowercase {
                    m.as_str().to_ascii_lowercase()
                } else {
                    m.as_str().to_owned()
                }
            })
            .filter(|t| !(self.config.remove_stopwords && self.stopwords.is_stopword(t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(config: TokenizerConfig, text: &str) -> Vec<String> {
        WordTokenizer::new(config).tokenize(text)
    }

    #[test]
    fn default_drops_stopwords_and_punctuation() {
        let out = tokens(TokenizerConfig::default(), "The machine, learning!");
        assert_eq!(out, vec!["machine", "learning"]);
    }

    #[test]
    fn keep_stopwords() {
        let out = tokens(TokenizerConfig::keep_stopwords(), "The cat sat on the mat.");
        assert_eq!(out, vec!["the", "cat", "sat", "on", "the", "mat"]);
    }

    #[test]
    fn raw_keeps_punctuation_and_case() {
        let out = tokens(TokenizerConfig::raw(), "Hi, Bob!");
        assert_eq!(out, vec!["Hi", ",", "Bob", "!"]);
    }

    #[test]
    fn contractions_keep_their_stem() {
        let out = tokens(TokenizerConfig::keep_stopwords(), "I don't know");
        assert_eq!(out, vec!["i", "do", "know"]);

        let out = tokens(TokenizerConfig::keep_stopwords(), "It's late, we can\u{2019}t stay");
        assert_eq!(out, vec!["it", "late", "we", "ca", "stay"]);

        let out = tokens(TokenizerConfig::keep_stopwords(), "they'll say you're right");
        assert_eq!(out, vec!["they", "say", "you", "right"]);
    }

    #[test]
    fn raw_keeps_clitics_as_tokens() {
        let out = tokens(TokenizerConfig::raw(), "Don't go");
        assert_eq!(out, vec!["Do", "n't", "go"]);
    }

    #[test]
    fn non_contraction_apostrophes_are_dropped() {
        let out = tokens(TokenizerConfig::keep_stopwords(), "at five o'clock sharp");
        assert_eq!(out, vec!["at", "five", "sharp"]);
    }

    #[test]
    fn split_clitic_forms() {
        assert_eq!(split_clitic("don't"), Some(("do", "n't")));
        assert_eq!(split_clitic("WON'T"), Some(("WO", "N'T")));
        assert_eq!(split_clitic("I'm"), Some(("I", "'m")));
        assert_eq!(split_clitic("we've"), Some(("we", "'ve")));
        assert_eq!(split_clitic("n't"), None);
        assert_eq!(split_clitic("o'clock"), None);
        assert_eq!(split_clitic("plain"), None);
    }

    #[test]
    fn numbers_are_dropped_with_punctuation_filter() {
        let out = tokens(TokenizerConfig::keep_stopwords(), "route 66 is long");
        assert_eq!(out, vec!["route", "is", "long"]);
    }

    #[test]
    fn lowercase_disabled() {
        let config = TokenizerConfig {
            lowercase: false,
            ..TokenizerConfig::keep_stopwords()
        };
        let out = tokens(config, "New York");
        assert_eq!(out, vec!["New", "York"]);
    }

    #[test]
    fn stopwords_removed_case_insensitively() {
        let config = TokenizerConfig {
            lowercase: false,
            ..TokenizerConfig::default()
        };
        let out = tokens(config, "The Machine");
        assert_eq!(out, vec!["Machine"]);
    }

    #[test]
    fn empty_input() {
        assert!(tokens(TokenizerConfig::default(), "").is_empty());
        assert!(tokens(TokenizerConfig::default(), "  \n\t ").is_empty());
    }

    #[test]
    fn custom_stopwords() {
        let tokenizer = WordTokenizer::with_stopwords(
            TokenizerConfig::default(),
            StopwordFilter::from_list(&["cat"]),
        );
        assert_eq!(tokenizer.tokenize("the cat sat"), vec!["the", "sat"]);
    }

    #[test]
    fn tokenize_into_reuses_buffer() {
        let tokenizer = WordTokenizer::new(TokenizerConfig::keep_stopwords());
        let mut buf = String::new();
        let mut count = 0;
        tokenizer.tokenize_into("one two three", &mut buf, |_| count += 1);
        assert_eq!(count, 3);
        assert_eq!(buf, "one two three");
    }

    #[test]
    fn regexp_tokenize_splits_apostrophes() {
        let tokenizer = WordTokenizer::new(TokenizerConfig::keep_stopwords());
        assert_eq!(
            tokenizer.regexp_tokenize("Don't stop 4 me"),
            vec!["don", "t", "stop", "me"]
        );
    }

    #[test]
    fn regexp_tokenize_removes_stopwords() {
        let tokenizer = WordTokenizer::default();
        assert_eq!(
            tokenizer.regexp_tokenize("The machine learning"),
            vec!["machine", "learning"]
        );
    }
}
