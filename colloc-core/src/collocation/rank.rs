//! Association ranking.
//!
//! Rankings are pure functions of the table they are computed from: a table
//! built from the tokens passed in, or the analyzer's cumulative table for
//! the `*_extracted` variants. Sorting is stable, so equal scores keep the
//! table's first-encountered order.

use colloc_types::{AssociationMeasure, Bigram, BigramKey, ScoredBigram};
use indexmap::IndexMap;
use tracing::debug;

use crate::collocation::scoring::{coerce, score};
use crate::collocation::table::FrequencyTable;
use crate::collocation::types::BigramAnalyzer;

/// Top collocations per measure, in [`AssociationMeasure::ALL`] order.
pub type Collocations = IndexMap<AssociationMeasure, Vec<Bigram>>;

impl FrequencyTable {
    /// Scores every bigram with `joint >= min_freq`, best first.
    pub fn ranked(&self, measure: AssociationMeasure, min_freq: u64) -> Vec<(BigramKey, f64)> {
        let total = self.total_bigrams();
        let mut scored: Vec<(BigramKey, f64)> = self
            .iter()
            .filter(|&(_, joint)| joint >= min_freq)
            .map(|(key, joint)| {
                let s = score(
                    measure,
                    joint,
                    self.unigram_count(key.first()),
                    self.unigram_count(key.second()),
                    total,
                );
                (key, coerce(s))
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    /// Returns the `top_n` best bigrams with `joint >= min_freq`.
    pub fn top(&self, measure: AssociationMeasure, top_n: usize, min_freq: u64) -> Vec<Bigram> {
        if top_n == 0 {
            return Vec::new();
        }
        self.ranked(measure, min_freq)
            .into_iter()
            .take(top_n)
            .filter_map(|(key, _)| self.bigram(key))
            .collect()
    }

    /// Scores every bigram, best first, without a frequency floor.
    pub fn scored(&self, measure: AssociationMeasure) -> Vec<ScoredBigram> {
        self.ranked(measure, 0)
            .into_iter()
            .filter_map(|(key, s)| Some(ScoredBigram::new(self.bigram(key)?, s)))
            .collect()
    }
}

impl BigramAnalyzer {
    /// Ranks the bigrams of `tokens` under `measure`.
    ///
    /// Only bigrams occurring at least `min_freq` times in `tokens` are
    /// considered. Returns at most `top_n` bigrams, best first; empty when
    /// none survive the filter.
    pub fn rank<S: AsRef<str>>(
        &self,
        measure: AssociationMeasure,
        tokens: &[S],
        top_n: usize,
        min_freq: u64,
    ) -> Vec<Bigram> {
        let table = FrequencyTable::from_tokens(tokens);
        let out = table.top(measure, top_n, min_freq);
        debug!(%measure, candidates = table.len(), returned = out.len(), "ranked bigrams");
        out
    }

    /// Scores every bigram of `tokens` under `measure`, best first.
    pub fn rank_all<S: AsRef<str>>(
        &self,
        measure: AssociationMeasure,
        tokens: &[S],
    ) -> Vec<ScoredBigram> {
        FrequencyTable::from_tokens(tokens).scored(measure)
    }

    /// Runs [`BigramAnalyzer::rank`] for every measure over one table.
    pub fn find_collocations<S: AsRef<str>>(
        &self,
        tokens: &[S],
        top_n: usize,
        min_freq: u64,
    ) -> Collocations {
        let table = FrequencyTable::from_tokens(tokens);
        AssociationMeasure::ALL
            .iter()
            .map(|&measure| (measure, table.top(measure, top_n, min_freq)))
            .collect()
    }

    /// Like [`BigramAnalyzer::rank`], over the cumulative tables.
    pub fn rank_extracted(
        &self,
        measure: AssociationMeasure,
        top_n: usize,
        min_freq: u64,
    ) -> Vec<Bigram> {
        self.table.top(measure, top_n, min_freq)
    }

    /// Like [`BigramAnalyzer::rank_all`], over the cumulative tables.
    pub fn rank_all_extracted(&self, measure: AssociationMeasure) -> Vec<ScoredBigram> {
        self.table.scored(measure)
    }
}
