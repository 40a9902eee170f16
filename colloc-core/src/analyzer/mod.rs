//! Text analysis pipeline.
//!
//! Reference implementation of the tokenization collaborator:
//! - **Normalizer**: Collapses whitespace and case-folds raw text
//! - **Tokenizer**: Splits normalized text into filtered word tokens
//! - **Sentence**: Splits raw text into sentences for context lookup
//! - **Stopwords**: Language stopword lists
//! - **Bigram**: Extracts adjacent token pairs

pub mod bigram;
pub mod normalizer;
pub mod sentence;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::TextNormalizer;
pub use sentence::SentenceSplitter;
pub use stopwords::StopwordFilter;
pub use tokenizer::WordTokenizer;
