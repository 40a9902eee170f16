//! Public API for extracting and counting bigrams.

use colloc_types::Bigram;
use tracing::debug;

use crate::analyzer::bigram::count_bigrams;
use crate::collocation::types::BigramAnalyzer;

impl BigramAnalyzer {
    /// Extracts the adjacent pairs of `tokens` and adds them to the
    /// cumulative tables.
    ///
    /// Returns the pairs of this call in order: `len - 1` bigrams, or none for
    /// fewer than two tokens. Repeated pairs are not deduplicated.
    #[inline(never)]
    pub fn extract<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<Bigram> {
        self.extract_calls += 1;

        let start = self.log.len();
        self.log.reserve(count_bigrams(tokens.len()));
        let log = &mut self.log;
        self.table.add_tokens(tokens, |key| log.push(key));

        let table = &self.table;
        let out: Vec<Bigram> = self.log[start..]
            .iter()
            .filter_map(|&key| table.bigram(key))
            .collect();

        debug!(
            tokens = tokens.len(),
            bigrams = out.len(),
            unique = self.table.len(),
            "extracted bigrams"
        );
        out
    }

    /// Returns the `n` most frequent bigrams of the cumulative table.
    ///
    /// Descending by count; equal counts keep first-encountered order.
    pub fn top_bigrams(&self, n: usize) -> Vec<(Bigram, u64)> {
        let mut entries: Vec<_> = self.table.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .take(n)
            .filter_map(|(key, count)| Some((self.table.bigram(key)?, count)))
            .collect()
    }

    /// Returns the cumulative count of `bigram`.
    pub fn frequency(&self, bigram: &Bigram) -> u64 {
        self.table.get(&bigram.first, &bigram.second)
    }

    /// Returns every bigram occurrence extracted so far, in order.
    pub fn extracted(&self) -> Vec<Bigram> {
        self.log
            .iter()
            .filter_map(|&key| self.table.bigram(key))
            .collect()
    }
}
