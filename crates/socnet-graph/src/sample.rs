//! Built-in sample graph.
//!
//! Five actors with a triangle and a tail, weighted with
//! [`AttributeSimilarity`]. Hosts pass [`sample_graph`] to
//! [`GraphLoader::load_or_init`](crate::GraphLoader::load_or_init) as the
//! default-graph generator when no file exists yet.

use socnet_core::{NodeId, Result};

use crate::weight::AttributeSimilarity;
use crate::{Graph, Node};

/// `(id, name, activity, interaction)` of the sample actors.
pub const SAMPLE_NODES: [(NodeId, &str, f64, u64); 5] = [
    (1, "Ayşe", 0.8, 12),
    (2, "Ali", 0.6, 7),
    (3, "Mehmet", 0.7, 9),
    (4, "Zeynep", 0.9, 15),
    (5, "Can", 0.3, 3),
];

/// Sample connections, added in this order.
pub const SAMPLE_EDGES: [(NodeId, NodeId); 5] = [(1, 2), (1, 3), (2, 3), (3, 4), (4, 5)];

/// Build the sample graph.
pub fn sample_graph() -> Result<Graph> {
    let mut graph = Graph::new();
    for (id, name, activity, interaction) in SAMPLE_NODES {
        graph.add_node(
            Node::new(id, name)
                .with_activity(activity)
                .with_interaction(interaction),
        )?;
    }
    for (a, b) in SAMPLE_EDGES {
        graph.add_weighted_edge(a, b, &AttributeSimilarity)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_graph_shape() {
        let graph = sample_graph().unwrap();
        assert_eq!(graph.summary(), "5 nodes, 5 edges");
        assert_eq!(graph.node(3).unwrap().name, "Mehmet");
        assert_eq!(graph.node(3).unwrap().degree(), 3);
    }

    #[test]
    fn test_sample_weights_follow_insertion_order() {
        let graph = sample_graph().unwrap();
        // 1-2 added first, both degrees 0: 1 / (1 + 0.2^2 + 5^2)
        let w12 = graph.edges_from(1)[0].weight;
        assert!((w12 - 0.038_402_457_757_296_47).abs() < 1e-12);
        // 2-3 added when both already had degree 1
        let w23 = graph.edges_from(2)[1].weight;
        assert!((w23 - 0.199_600_798_403_193_6).abs() < 1e-12);
    }
}
