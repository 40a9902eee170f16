//! Analyzer types and constants.

use colloc_types::BigramKey;

use crate::collocation::table::FrequencyTable;

/// Number of rows produced by [`BigramAnalyzer::export_records`].
pub const EXPORT_LIMIT: usize = 100;

/// Accumulating bigram statistics engine for one document.
///
/// Every call to [`BigramAnalyzer::extract`] adds to the same frequency
/// tables; only [`BigramAnalyzer::clear`] or a fresh instance resets them.
pub struct BigramAnalyzer {
    pub(crate) table: FrequencyTable,
    /// Every bigram occurrence ever extracted, in order
    pub(crate) log: Vec<BigramKey>,
    /// Total number of extract calls
    pub(crate) extract_calls: u64,
}

impl Default for BigramAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BigramAnalyzer {
    /// Creates an analyzer with empty tables.
    pub fn new() -> Self {
        Self {
            table: FrequencyTable::new(),
            log: Vec::with_capacity(1024),
            extract_calls: 0,
        }
    }

    /// Returns the number of distinct bigrams seen.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no bigram has been extracted.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Cumulative frequency table.
    #[inline(always)]
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Resets all accumulated state.
    pub fn clear(&mut self) {
        self.table.clear();
        self.log.clear();
        self.extract_calls = 0;
    }

    /// Returns counters describing the analyzer's work so far.
    #[inline(always)]
    #[must_use]
    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            extract_calls: self.extract_calls,
            tokens_seen: self.table.total_tokens(),
            bigrams_extracted: self.log.len() as u64,
            unique_bigrams: self.table.len() as u64,
        }
    }
}

/// Basic operational metrics for the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Number of extract calls since creation or the last clear.
    pub extract_calls: u64,
    /// Tokens passed to extract.
    pub tokens_seen: u64,
    /// Bigram occurrences extracted.
    pub bigrams_extracted: u64,
    /// Distinct bigrams in the cumulative table.
    pub unique_bigrams: u64,
}
