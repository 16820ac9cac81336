//! Degree centrality ranking.

use serde::{Deserialize, Serialize};
use socnet_core::NodeId;
use std::cmp::Reverse;

use crate::Graph;

/// One node's degree centrality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentralityRow {
    /// Node id.
    pub id: NodeId,
    /// Node display name.
    pub name: String,
    /// Number of distinct neighbors.
    pub degree: usize,
    /// `degree / (n - 1)`, in `[0, 1]`.
    pub centrality: f64,
}

/// Degree centrality of every node, most connected first.
///
/// Rows with equal degree keep the store's insertion order. A graph with
/// fewer than two nodes has no meaningful normalisation and yields no rows.
pub fn degree_centrality(graph: &Graph) -> Vec<CentralityRow> {
    let n = graph.node_count();
    if n <= 1 {
        return Vec::new();
    }

    let denominator = (n - 1) as f64;
    let mut rows: Vec<CentralityRow> = graph
        .nodes()
        .map(|node| CentralityRow {
            id: node.id,
            name: node.name.clone(),
            degree: node.degree(),
            centrality: node.degree() as f64 / denominator,
        })
        .collect();

    rows.sort_by_key(|row| Reverse(row.degree));
    rows
}

/// The first `k` rows of [`degree_centrality`].
pub fn top_k_degree_centrality(graph: &Graph, k: usize) -> Vec<CentralityRow> {
    let mut rows = degree_centrality(graph);
    rows.truncate(k);
    rows
}

// ============================================================================
// Tests
// ============================================================================
