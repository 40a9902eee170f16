//! Graph view of frequent bigrams.

use colloc_types::{BigramNetwork, NetworkEdge};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use tracing::debug;

use crate::collocation::table::FrequencyTable;
use crate::collocation::types::BigramAnalyzer;

/// Builds the network of bigrams occurring at least `min_freq` times.
///
/// Edges follow the table's first-encountered order; nodes are the words of
/// those edges, each listed once, in the order they first appear.
pub fn build_network(table: &FrequencyTable, min_freq: u64) -> BigramNetwork {
    let mut nodes: IndexSet<&str, FxBuildHasher> = IndexSet::default();
    let mut edges = Vec::new();
    let vocab = table.vocabulary();

    for (key, weight) in table.iter().filter(|&(_, c)| c >= min_freq) {
        let (Some(source), Some(target)) = (vocab.resolve(key.first()), vocab.resolve(key.second()))
        else {
            continue;
        };
        nodes.insert(source);
        nodes.insert(target);
        edges.push(NetworkEdge {
            source: source.to_owned(),
            target: target.to_owned(),
            weight,
        });
    }

    BigramNetwork {
        nodes: nodes.into_iter().map(str::to_owned).collect(),
        edges,
    }
}

impl BigramAnalyzer {
    /// Builds the bigram network of `tokens`.
    pub fn network<S: AsRef<str>>(&self, tokens: &[S], min_freq: u64) -> BigramNetwork {
        let net = build_network(&FrequencyTable::from_tokens(tokens), min_freq);
        debug!(nodes = net.nodes.len(), edges = net.edges.len(), "built bigram network");
        net
    }
}
