//! Bigram and unigram frequency tables.

use colloc_types::{Bigram, BigramKey, TokenId};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::analyzer::bigram::extract_bigram_keys;
use crate::vocab::Vocabulary;

/// Joint and marginal counts for a sample of token sequences.
///
/// Bigram counts keep first-encountered order, which is the tie-break order
/// of every ranking built on the table. Unigram counts are indexed by
/// [`TokenId`] and cover every token, including the last of a sequence.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    vocab: Vocabulary,
    bigrams: IndexMap<BigramKey, u64, FxBuildHasher>,
    unigrams: Vec<u64>,
    total_bigrams: u64,
    total_tokens: u64,
    /// Scratch buffer for interned ids of the sequence being added
    ids: Vec<TokenId>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from one token sequence.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut table = Self::new();
        table.add_tokens(tokens, |_| {});
        table
    }

    /// Counts the bigrams and unigrams of `tokens` into the table.
    ///
    /// `on_bigram` receives every bigram key in sequence order.
    pub fn add_tokens<S, F>(&mut self, tokens: &[S], mut on_bigram: F)
    where
        S: AsRef<str>,
        F: FnMut(BigramKey),
    {
        self.ids.clear();
        self.ids.reserve(tokens.len());

        for token in tokens {
            let id = self.vocab.intern(token.as_ref());
            if id as usize >= self.unigrams.len() {
                self.unigrams.resize(id as usize + 1, 0);
            }
            self.unigrams[id as usize] += 1;
            self.ids.push(id);
        }
        self.total_tokens += tokens.len() as u64;

        let bigrams = &mut self.bigrams;
        let mut added = 0u64;
        extract_bigram_keys(&self.ids, |key, _| {
            *bigrams.entry(key).or_insert(0) += 1;
            added += 1;
            on_bigram(key);
        });
        self.total_bigrams += added;
    }

    /// Returns the count of a bigram key.
    #[inline]
    pub fn count(&self, key: BigramKey) -> u64 {
        self.bigrams.get(&key).copied().unwrap_or(0)
    }

    /// Returns the count of the bigram `(first, second)`.
    pub fn get(&self, first: &str, second: &str) -> u64 {
        match (self.vocab.get(first), self.vocab.get(second)) {
            (Some(a), Some(b)) => self.count(BigramKey::new(a, b)),
            _ => 0,
        }
    }

    /// Returns the marginal count of a token id.
    #[inline(always)]
    pub fn unigram_count(&self, id: TokenId) -> u64 {
        self.unigrams.get(id as usize).copied().unwrap_or(0)
    }

    /// Returns the marginal count of a token.
    pub fn unigram(&self, token: &str) -> u64 {
        self.vocab
            .get(token)
            .map_or(0, |id| self.unigram_count(id))
    }

    /// Resolves a key into an owned bigram.
    pub fn bigram(&self, key: BigramKey) -> Option<Bigram> {
        Some(Bigram::new(
            self.vocab.resolve(key.first())?,
            self.vocab.resolve(key.second())?,
        ))
    }

    /// Looks up the key of `(first, second)` without inserting.
    pub fn key_of(&self, first: &str, second: &str) -> Option<BigramKey> {
        Some(BigramKey::new(self.vocab.get(first)?, self.vocab.get(second)?))
    }

    /// Iterates `(key, count)` in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (BigramKey, u64)> + '_ {
        self.bigrams.iter().map(|(&k, &c)| (k, c))
    }

    /// Iterates the counts in first-encountered order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.bigrams.values().copied()
    }

    /// Number of distinct bigrams.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bigrams.len()
    }

    /// Returns `true` if no bigram has been counted.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bigrams.is_empty()
    }

    /// Number of bigram occurrences (the sample size).
    #[inline(always)]
    pub fn total_bigrams(&self) -> u64 {
        self.total_bigrams
    }

    /// Number of token occurrences.
    #[inline(always)]
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Token vocabulary of the table.
    #[inline(always)]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Resets every count, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.vocab.clear();
        self.bigrams.clear();
        self.unigrams.clear();
        self.total_bigrams = 0;
        self.total_tokens = 0;
        self.ids.clear();
    }
}
