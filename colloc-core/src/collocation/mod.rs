//! Bigram statistics engine.
//!
//! Counts adjacent token pairs and scores them with association measures
//! to surface collocations.
//!
//! Memory Layout:
//! - Tokens are interned once into a contiguous [`Vocabulary`](crate::vocab::Vocabulary)
//!   buffer and addressed by 32-bit ids
//! - Bigrams are packed `u64` keys in an insertion-ordered map, so ties in
//!   every ranking resolve to first-encountered order
//! - Unigram marginals live in a dense vector indexed by token id
//!
//! Threading:
//! - [`BigramAnalyzer`] holds per-document state and is mutated through
//!   `&mut self`; use one instance per document.

pub mod context;
pub mod export;
pub mod network;
pub mod rank;
pub mod scoring;
pub mod similarity;
pub mod stats;
pub mod table;

mod api;
mod types;

pub use rank::Collocations;
pub use table::FrequencyTable;
pub use types::{BigramAnalyzer, EngineMetrics, EXPORT_LIMIT};
