//! Bigram frequency and collocation statistics.
//!
//! Turns token sequences into bigram frequency tables and scores them with
//! association measures (PMI, chi-square, likelihood ratio, Student's t and
//! raw frequency) to surface recurring phrases and collocations.
//!
//! ```
//! use colloc_core::BigramAnalyzer;
//! use colloc_types::{AssociationMeasure, Bigram};
//!
//! let tokens = ["the", "cat", "sat", "the", "cat", "ran"];
//! let mut analyzer = BigramAnalyzer::new();
//! analyzer.extract(&tokens);
//!
//! let top = analyzer.rank(AssociationMeasure::Pmi, &tokens, 3, 1);
//! assert_eq!(top[0], Bigram::new("the", "cat"));
//! assert_eq!(analyzer.stats().total_bigrams, 5);
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod collocation;
pub mod config;
pub mod error;
pub mod vocab;

pub use collocation::{BigramAnalyzer, Collocations, EngineMetrics, FrequencyTable};
pub use config::AnalysisConfig;
pub use error::{ConfigError, Error, ExportError, Result};
