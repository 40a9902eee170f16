//! Descriptive statistics over frequency tables.

use colloc_types::BigramStats;

use crate::collocation::table::FrequencyTable;
use crate::collocation::types::BigramAnalyzer;

/// Summarizes the bigram counts of a table.
///
/// Every field is zero for an empty table.
pub fn summarize(table: &FrequencyTable) -> BigramStats {
    BigramStats::from_counts(table.counts())
}

impl BigramAnalyzer {
    /// Returns statistics over the cumulative frequency table.
    pub fn stats(&self) -> BigramStats {
        summarize(&self.table)
    }

    /// Returns statistics over the bigrams of `tokens` alone.
    ///
    /// The analyzer's cumulative tables are left untouched.
    pub fn summarize_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> BigramStats {
        summarize(&FrequencyTable::from_tokens(tokens))
    }

    /// Serializes [`BigramAnalyzer::stats`] as JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures.
    pub fn stats_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.stats())
    }
}
