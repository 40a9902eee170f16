//! Core types and traits for the Colloc bigram statistics engine.
//!
//! This crate provides the fundamental types that are shared across
//! the Colloc workspace. Keeping types separate ensures:
//!
//! - **Compact keys**: Bigrams are packed into a single `u64` for hashing
//! - **Cross-crate compatibility**: The engine and its consumers share the same records
//! - **Clean boundaries**: No circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Interned token identifier.
///
/// Tokens are identified by a 32-bit unsigned integer assigned by a
/// per-analyzer vocabulary. Ids are dense and start at zero.
pub type TokenId = u32;

/// A bigram of two interned tokens packed into a 64-bit integer.
///
/// Packed as: `(first << 32) | second`
/// This representation:
/// - Enables fast equality comparison and hashing
/// - Works as a hash map key without allocation
/// - Keeps the ordered pair semantics (`(a, b) != (b, a)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BigramKey(pub u64);

impl BigramKey {
    /// Creates a key from two token ids.
    #[inline(always)]
    pub const fn new(first: TokenId, second: TokenId) -> Self {
        Self(((first as u64) << 32) | (second as u64))
    }

    /// Returns the id of the left token.
    #[inline(always)]
    pub const fn first(self) -> TokenId {
        (self.0 >> 32) as TokenId
    }

    /// Returns the id of the right token.
    #[inline(always)]
    pub const fn second(self) -> TokenId {
        (self.0 & 0xFFFF_FFFF) as TokenId
    }

    /// Returns the underlying u64 value.
    #[inline(always)]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<(TokenId, TokenId)> for BigramKey {
    #[inline(always)]
    fn from((first, second): (TokenId, TokenId)) -> Self {
        Self::new(first, second)
    }
}

/// An ordered pair of adjacent tokens.
///
/// Equality is pairwise string equality. The owned form is what the engine
/// hands back to callers; internally bigrams travel as [`BigramKey`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bigram {
    /// Left token.
    pub first: String,
    /// Right token.
    pub second: String,
}

impl Bigram {
    /// Creates a bigram from two tokens.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Returns the surface phrase `"first second"`.
    pub fn phrase(&self) -> String {
        let mut out = String::with_capacity(self.first.len() + self.second.len() + 1);
        out.push_str(&self.first);
        out.push(' ');
        out.push_str(&self.second);
        out
    }

    /// Returns both tokens as string slices.
    #[inline]
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

impl From<(&str, &str)> for Bigram {
    fn from((first, second): (&str, &str)) -> Self {
        Self::new(first, second)
    }
}

impl From<(String, String)> for Bigram {
    fn from((first, second): (String, String)) -> Self {
        Self { first, second }
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// A bigram paired with its association score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBigram {
    /// The scored bigram.
    pub bigram: Bigram,
    /// Association score (higher is stronger).
    pub score: f64,
}

impl ScoredBigram {
    /// Creates a new scored bigram.
    #[inline]
    pub const fn new(bigram: Bigram, score: f64) -> Self {
        Self { bigram, score }
    }
}

impl fmt::Display for ScoredBigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} score={:.3}", self.bigram, self.score)
    }
}

/// Statistical association measure used to score a bigram.
///
/// Every measure takes the joint count of the bigram, the marginal counts
/// of its two tokens and the sample size, and returns a real score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationMeasure {
    /// Pointwise mutual information.
    Pmi,
    /// Pearson's chi-square over the 2x2 contingency table.
    #[serde(alias = "chi_sq")]
    ChiSquare,
    /// Log-likelihood ratio (G²) over the 2x2 contingency table.
    LikelihoodRatio,
    /// Student's t statistic.
    StudentT,
    /// Relative frequency of the bigram.
    RawFreq,
}

impl AssociationMeasure {
    /// All measures, in their canonical reporting order.
    pub const ALL: [AssociationMeasure; 5] = [
        AssociationMeasure::Pmi,
        AssociationMeasure::ChiSquare,
        AssociationMeasure::LikelihoodRatio,
        AssociationMeasure::StudentT,
        AssociationMeasure::RawFreq,
    ];

    /// Canonical name of the measure.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AssociationMeasure::Pmi => "pmi",
            AssociationMeasure::ChiSquare => "chi_square",
            AssociationMeasure::LikelihoodRatio => "likelihood_ratio",
            AssociationMeasure::StudentT => "student_t",
            AssociationMeasure::RawFreq => "raw_freq",
        }
    }
}

impl fmt::Display for AssociationMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssociationMeasure {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pmi" => Ok(AssociationMeasure::Pmi),
            "chi_square" | "chi_sq" => Ok(AssociationMeasure::ChiSquare),
            "likelihood_ratio" => Ok(AssociationMeasure::LikelihoodRatio),
            "student_t" => Ok(AssociationMeasure::StudentT),
            "raw_freq" => Ok(AssociationMeasure::RawFreq),
            other => Err(MeasureError::Unknown {
                name: other.to_string(),
            }),
        }
    }
}

/// Errors raised when resolving an association measure by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeasureError {
    /// The name does not correspond to any supported measure.
    #[error(
        "invalid argument: unknown measure {name:?} \
         (expected one of: pmi, chi_square, likelihood_ratio, student_t, raw_freq)"
    )]
    Unknown {
        /// The rejected name.
        name: String,
    },
}

/// Sentences of a document that contain a target bigram.
///
/// One entry per matching sentence, in document order. A sentence that
/// contains the phrase twice is still listed once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    /// Number of matching sentences.
    pub occurrences: usize,
    /// Original-case text of each matching sentence.
    pub sentences: Vec<String>,
    /// Zero-based sentence index of each match.
    pub positions: Vec<usize>,
}

impl ContextRecord {
    /// Returns `true` if no sentence matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occurrences == 0
    }
}

/// Descriptive statistics over a bigram frequency table.
///
/// All fields are zero for an empty table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BigramStats {
    /// Sum of all bigram counts (occurrences, including repeats).
    pub total_bigrams: u64,
    /// Number of distinct bigrams.
    pub unique_bigrams: usize,
    /// Mean count per distinct bigram.
    pub avg_frequency: f64,
    /// Population standard deviation of the counts.
    pub std_frequency: f64,
    /// Largest count.
    pub max_frequency: u64,
    /// Smallest count.
    pub min_frequency: u64,
    /// `unique_bigrams / total_bigrams`.
    pub coverage: f64,
}

impl BigramStats {
    /// Computes statistics from a sequence of per-bigram counts.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut total = 0u64;
        let mut unique = 0usize;
        let mut max = 0u64;
        let mut min = u64::MAX;
        // Welford's running mean/variance
        let mut mean = 0.0f64;
        let mut m2 = 0.0f64;

        for count in counts {
            unique += 1;
            total += count;
            max = max.max(count);
            min = min.min(count);

            let x = count as f64;
            let delta = x - mean;
            mean += delta / unique as f64;
            m2 += delta * (x - mean);
        }

        if unique == 0 {
            return Self::default();
        }

        Self {
            total_bigrams: total,
            unique_bigrams: unique,
            avg_frequency: mean,
            std_frequency: (m2 / unique as f64).sqrt(),
            max_frequency: max,
            min_frequency: min,
            coverage: if total > 0 {
                unique as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

impl fmt::Display for BigramStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bigrams ({} unique), avg={:.3} std={:.3} max={} min={} coverage={:.1}%",
            self.total_bigrams,
            self.unique_bigrams,
            self.avg_frequency,
            self.std_frequency,
            self.max_frequency,
            self.min_frequency,
            self.coverage * 100.0
        )
    }
}

/// One row of the exported collocation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Surface phrase `"word1 word2"`.
    pub bigram: String,
    /// Left token.
    pub word1: String,
    /// Right token.
    pub word2: String,
    /// Count in the analyzer's cumulative frequency table.
    pub frequency: u64,
    /// PMI score.
    pub pmi_score: f64,
    /// Chi-square score, 0 when not computed for this bigram.
    pub chi_square_score: f64,
}

/// Weighted edge of a bigram network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEdge {
    /// Left token.
    pub source: String,
    /// Right token.
    pub target: String,
    /// Bigram frequency.
    pub weight: u64,
}

/// Graph view of the frequent bigrams of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigramNetwork {
    /// Distinct tokens, in first-seen order.
    pub nodes: Vec<String>,
    /// One edge per bigram passing the frequency floor.
    pub edges: Vec<NetworkEdge>,
}

/// Tokenization options.
///
/// The engine does not consult these; they document which configuration
/// produced a token sequence, since frequency and association results
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Drop English stopwords.
    pub remove_stopwords: bool,
    /// Case-fold tokens.
    pub lowercase: bool,
    /// Drop punctuation-only, apostrophe-bearing and non-alphabetic tokens.
    pub remove_punctuation: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            lowercase: true,
            remove_punctuation: true,
        }
    }
}

impl TokenizerConfig {
    /// Keeps every word (including stopwords); still lowercases and strips punctuation.
    ///
    /// Useful for surfacing phrases made of function words, e.g. "in everything".
    pub const fn keep_stopwords() -> Self {
        Self {
            remove_stopwords: false,
            lowercase: true,
            remove_punctuation: true,
        }
    }

    /// Emits every segment as-is.
    pub const fn raw() -> Self {
        Self {
            remove_stopwords: false,
            lowercase: false,
            remove_punctuation: false,
        }
    }
}
