//! TF-IDF cosine similarity between bigrams.
//!
//! Each bigram is treated as the two-word document `"w1 w2"`. Terms are runs
//! of two or more word characters after lowercasing, so single-letter words
//! contribute nothing. Weights are raw term counts times the smoothed inverse
//! document frequency `ln((1 + n) / (1 + df)) + 1`, and every vector is scaled
//! to unit length.

use std::sync::OnceLock;

use colloc_types::Bigram;
use indexmap::IndexMap;
use regex::Regex;
use rustc_hash::FxBuildHasher;

use crate::collocation::types::BigramAnalyzer;

fn term_pattern() -> &'static Regex {
    static TERM: OnceLock<Regex> = OnceLock::new();
    TERM.get_or_init(|| Regex::new(r"(?u)\b\w\w+\b").expect("valid regex"))
}

/// Returns the pairwise cosine similarity of `bigrams`.
///
/// Entry `[i][j]` compares bigram `i` with bigram `j`. Bigrams with no
/// qualifying term have a zero vector and score 0 against everything,
/// themselves included.
pub fn similarity_matrix(bigrams: &[Bigram]) -> Vec<Vec<f64>> {
    let n = bigrams.len();
    let mut terms: IndexMap<String, usize, FxBuildHasher> = IndexMap::default();
    let mut doc_terms: Vec<Vec<(usize, f64)>> = Vec::with_capacity(n);

    for bigram in bigrams {
        let lowered = bigram.phrase().to_lowercase();
        let mut counts: IndexMap<usize, f64, FxBuildHasher> = IndexMap::default();
        for m in term_pattern().find_iter(&lowered) {
            let next = terms.len();
            let term = *terms.entry(m.as_str().to_owned()).or_insert(next);
            *counts.entry(term).or_insert(0.0) += 1.0;
        }
        doc_terms.push(counts.into_iter().collect());
    }

    let mut df = vec![0usize; terms.len()];
    for doc in &doc_terms {
        for &(term, _) in doc {
            df[term] += 1;
        }
    }
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n as f64) / (1.0 + d as f64)).ln() + 1.0)
        .collect();

    let vectors: Vec<Vec<f64>> = doc_terms
        .iter()
        .map(|doc| {
            let mut v = vec![0.0; terms.len()];
            for &(term, tf) in doc {
                v[term] = tf * idf[term];
            }
            let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > 0.0 {
                v.iter_mut().for_each(|x| *x /= norm);
            }
            v
        })
        .collect();

    vectors
        .iter()
        .map(|a| {
            vectors
                .iter()
                .map(|b| a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>())
                .collect()
        })
        .collect()
}

impl BigramAnalyzer {
    /// Returns the TF-IDF cosine similarity matrix of `bigrams`.
    pub fn similarity_matrix(&self, bigrams: &[Bigram]) -> Vec<Vec<f64>> {
        similarity_matrix(bigrams)
    }
}
