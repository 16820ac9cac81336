//! Connected components.

use socnet_core::NodeId;
use std::cmp::Reverse;
use std::collections::HashMap;

use super::traversal::bfs_from;
use crate::Graph;

/// Partition the graph into connected components.
///
/// Each component lists its members in ascending id order. Components are
/// ordered by size, largest first; components of equal size are ordered by
/// their smallest member id. Isolated nodes form singleton components.
pub fn connected_components(graph: &Graph) -> Vec<Vec<NodeId>> {
    let mut seeds: Vec<(NodeId, usize)> = graph.node_ids().zip(0..).collect();
    seeds.sort_unstable();

    let mut visited = vec![false; graph.node_count()];
    let mut components = Vec::new();
    for (_, pos) in seeds {
        if visited[pos] {
            continue;
        }
        let mut members = bfs_from(graph, pos, &mut visited);
        members.sort_unstable();
        components.push(members);
    }

    // Seeds run in ascending id order, so a stable sort keeps equal-sized
    // components ordered by smallest member.
    components.sort_by_key(|members| Reverse(members.len()));
    components
}

/// Map every member id to the index of its component in `components`.
pub fn component_index_map(components: &[Vec<NodeId>]) -> HashMap<NodeId, usize> {
    components
        .iter()
        .enumerate()
        .flat_map(|(index, members)| members.iter().map(move |&id| (id, index)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
