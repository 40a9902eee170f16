//! Bigram extraction module.
//!
//! Provides allocation-free extraction of adjacent token pairs.
//! Bigrams are the unit every frequency and association statistic is built on.

use colloc_types::{BigramKey, TokenId};

/// Extracts adjacent pairs from a token sequence using a sliding window.
///
/// For sequences shorter than 2 tokens, no bigrams are emitted.
/// For a sequence of length N, exactly N-1 bigrams are emitted, in order.
///
/// # Example
///
/// ```
/// use colloc_core::analyzer::bigram::extract_bigrams;
///
/// let mut pairs = Vec::new();
/// extract_bigrams(&["new", "york", "city"], |a, b| pairs.push((*a, *b)));
///
/// assert_eq!(pairs, vec![("new", "york"), ("york", "city")]);
/// ```
#[inline(always)]
pub fn extract_bigrams<'t, T, F>(tokens: &'t [T], mut callback: F)
where
    F: FnMut(&'t T, &'t T),
{
    for window in tokens.windows(2) {
        callback(&window[0], &window[1]);
    }
}

/// Counts bigrams without allocating.
///
/// Returns 0 for sequences shorter than 2 tokens.
#[inline(always)]
pub const fn count_bigrams(len: usize) -> usize {
    len.saturating_sub(1)
}

/// Extracts packed bigram keys from a sequence of interned ids.
///
/// The callback receives `(key, position)`, where position is the index of
/// the left token in the sequence.
#[inline(always)]
pub fn extract_bigram_keys<F>(ids: &[TokenId], mut callback: F)
where
    F: FnMut(BigramKey, usize),
{
    let mut pos = 0;
    extract_bigrams(ids, |&a, &b| {
        callback(BigramKey::new(a, b), pos);
        pos += 1;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_basic() {
        let tokens = ["a", "b", "c", "d"];
        let mut pairs = Vec::new();
        extract_bigrams(&tokens, |a, b| pairs.push((*a, *b)));

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("a", "b"));
        assert_eq!(pairs[1], ("b", "c"));
        assert_eq!(pairs[2], ("c", "d"));
    }

    #[test]
    fn extract_short_input() {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        extract_bigrams::<&str, _>(&[], |a, b| pairs.push((*a, *b)));
        assert!(pairs.is_empty());

        extract_bigrams(&["alone"], |a, b| pairs.push((*a, *b)));
        assert!(pairs.is_empty());
    }

    #[test]
    fn extract_exactly_two() {
        let mut pairs = Vec::new();
        extract_bigrams(&["x", "y"], |a, b| pairs.push((*a, *b)));
        assert_eq!(pairs, vec![("x", "y")]);
    }

    #[test]
    fn extract_owned_strings() {
        let tokens: Vec<String> = vec!["one".into(), "two".into(), "three".into()];
        let mut joined = Vec::new();
        extract_bigrams(&tokens, |a, b| joined.push(format!("{a} {b}")));
        assert_eq!(joined, vec!["one two", "two three"]);
    }

    #[test]
    fn count_basic() {
        assert_eq!(count_bigrams(0), 0);
        assert_eq!(count_bigrams(1), 0);
        assert_eq!(count_bigrams(2), 1);
        assert_eq!(count_bigrams(5), 4);
    }

    #[test]
    fn keys_with_positions() {
        let mut results = Vec::new();
        extract_bigram_keys(&[0, 1, 0, 1], |k, pos| results.push((k, pos)));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], (BigramKey::new(0, 1), 0));
        assert_eq!(results[1], (BigramKey::new(1, 0), 1));
        assert_eq!(results[2], (BigramKey::new(0, 1), 2));
    }

    #[test]
    fn repeated_tokens_still_pair() {
        let mut pairs = Vec::new();
        extract_bigrams(&["ha", "ha", "ha"], |a, b| pairs.push((*a, *b)));
        assert_eq!(pairs, vec![("ha", "ha"), ("ha", "ha")]);
    }
}
