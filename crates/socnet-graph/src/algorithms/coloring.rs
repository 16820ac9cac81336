//! Welsh–Powell greedy graph coloring.
//!
//! Nodes are visited in descending degree order. Each still-uncolored node
//! opens a new color, which is then handed to every later uncolored node
//! that has no neighbor holding it. The result is always a proper coloring;
//! it is not guaranteed to use the minimum number of colors.

use serde::{Deserialize, Serialize};
use socnet_core::{Error, NodeId, Result};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::Graph;

/// One colored node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringRow {
    /// Node id.
    pub id: NodeId,
    /// Node display name.
    pub name: String,
    /// Number of distinct neighbors.
    pub degree: usize,
    /// 1-based color.
    pub color: u32,
}

/// A proper coloring of (part of) a graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    /// Color of every colored node.
    pub colors: BTreeMap<NodeId, u32>,
    /// Colored nodes ordered by color, then degree descending, then id.
    pub rows: Vec<ColoringRow>,
}

impl Coloring {
    /// Number of distinct colors used.
    pub fn color_count(&self) -> u32 {
        self.colors.values().copied().max().unwrap_or(0)
    }

    /// Color assigned to `id`, if it was part of the coloring.
    pub fn color_of(&self, id: NodeId) -> Option<u32> {
        self.colors.get(&id).copied()
    }

    /// Whether no two adjacent colored nodes share a color.
    pub fn is_proper(&self, graph: &Graph) -> bool {
        self.colors.iter().all(|(&id, &color)| {
            graph
                .neighbors(id)
                .into_iter()
                .all(|other| self.color_of(other) != Some(color))
        })
    }
}

/// Color `subset` (or the whole graph when `None`) with Welsh–Powell.
///
/// Duplicate ids in `subset` are ignored. Only edges between colored nodes
/// constrain the result; neighbors outside the subset are disregarded.
///
/// # Errors
///
/// [`Error::NotFound`] if a subset id is absent.
pub fn welsh_powell(graph: &Graph, subset: Option<&[NodeId]>) -> Result<Coloring> {
    let mut order: Vec<usize> = match subset {
        None => (0..graph.node_count()).collect(),
        Some(ids) => {
            let mut seen = vec![false; graph.node_count()];
            let mut order = Vec::with_capacity(ids.len());
            for &id in ids {
                let pos = graph
                    .position(id)
                    .ok_or_else(|| Error::node_not_found(id))?;
                if !seen[pos] {
                    seen[pos] = true;
                    order.push(pos);
                }
            }
            order
        }
    };
    order.sort_by_key(|&pos| Reverse(graph.node_at(pos).degree()));

    // 0 = uncolored. `blocked[v] == c` marks v as adjacent to a holder of c.
    let mut color = vec![0u32; graph.node_count()];
    let mut blocked = vec![0u32; graph.node_count()];
    let mut current = 0u32;

    for (i, &u) in order.iter().enumerate() {
        if color[u] != 0 {
            continue;
        }
        current += 1;
        assign(graph, u, current, &mut color, &mut blocked);

        for &v in &order[i + 1..] {
            if color[v] != 0 || blocked[v] == current {
                continue;
            }
            let touches_holder = graph
                .edges_at(v)
                .iter()
                .filter_map(|e| graph.position(e.to))
                .any(|w| color[w] == current);
            if !touches_holder {
                assign(graph, v, current, &mut color, &mut blocked);
            }
        }
    }

    let mut rows: Vec<ColoringRow> = order
        .iter()
        .map(|&pos| {
            let node = graph.node_at(pos);
            ColoringRow {
                id: node.id,
                name: node.name.clone(),
                degree: node.degree(),
                color: color[pos],
            }
        })
        .collect();
    rows.sort_by_key(|row| (row.color, Reverse(row.degree), row.id));

    let colors = rows.iter().map(|row| (row.id, row.color)).collect();
    Ok(Coloring { colors, rows })
}

fn assign(graph: &Graph, pos: usize, c: u32, color: &mut [u32], blocked: &mut [u32]) {
    color[pos] = c;
    for edge in graph.edges_at(pos) {
        if let Some(w) = graph.position(edge.to) {
            blocked[w] = c;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    /// 1-2, 1-3, 2-3, 3-4, 4-5.
    fn create_test_graph() -> Graph {
        let mut graph = Graph::new();
        for id in 1..=5 {
            graph.add_node(Node::new(id, format!("n{id}"))).unwrap();
        }
        for (a, b) in [(1, 2), (1, 3), (2, 3), (3, 4), (4, 5)] {
            graph.add_undirected_edge(a, b, 1.0).unwrap();
        }
        graph
    }

    #[test]
    fn test_welsh_powell_assignment() {
        let graph = create_test_graph();
        let coloring = welsh_powell(&graph, None).unwrap();

        assert_eq!(coloring.color_of(3), Some(1));
        assert_eq!(coloring.color_of(5), Some(1));
        assert_eq!(coloring.color_of(1), Some(2));
        assert_eq!(coloring.color_of(4), Some(2));
        assert_eq!(coloring.color_of(2), Some(3));
        assert_eq!(coloring.color_count(), 3);
        assert!(coloring.is_proper(&graph));
    }

    #[test]
    fn test_rows_sorted_by_color_degree_id() {
        let coloring = welsh_powell(&create_test_graph(), None).unwrap();
        let rows: Vec<(NodeId, u32, usize)> = coloring
            .rows
            .iter()
            .map(|r| (r.id, r.color, r.degree))
            .collect();

        assert_eq!(
            rows,
            vec![(3, 1, 3), (5, 1, 1), (1, 2, 2), (4, 2, 2), (2, 3, 2)]
        );
        assert_eq!(coloring.rows[0].name, "n3");
    }

    #[test]
    fn test_subset_coloring() {
        let graph = create_test_graph();
        let coloring = welsh_powell(&graph, Some(&[4, 5, 4])).unwrap();

        assert_eq!(coloring.colors.len(), 2);
        assert_eq!(coloring.color_of(4), Some(1));
        assert_eq!(coloring.color_of(5), Some(2));
        assert_eq!(coloring.color_of(3), None);
    }

    #[test]
    fn test_subset_ignores_outside_neighbors() {
        let graph = create_test_graph();
        // 1 and 4 are not adjacent; their common neighbor 3 is excluded.
        let coloring = welsh_powell(&graph, Some(&[1, 4])).unwrap();
        assert_eq!(coloring.color_count(), 1);
    }

    #[test]
    fn test_subset_with_unknown_id() {
        let graph = create_test_graph();
        assert!(welsh_powell(&graph, Some(&[1, 42])).unwrap_err().is_not_found());
    }

    #[test]
    fn test_empty_inputs() {
        let coloring = welsh_powell(&Graph::new(), None).unwrap();
        assert_eq!(coloring.color_count(), 0);
        assert!(coloring.rows.is_empty());

        let coloring = welsh_powell(&create_test_graph(), Some(&[])).unwrap();
        assert!(coloring.colors.is_empty());
    }

    #[test]
    fn test_isolated_nodes_share_first_color() {
        let mut graph = Graph::new();
        for id in 1..=3 {
            graph.add_node(Node::unnamed(id)).unwrap();
        }
        let coloring = welsh_powell(&graph, None).unwrap();
        assert_eq!(coloring.color_count(), 1);
    }

    #[test]
    fn test_coloring_serializes() {
        let coloring = welsh_powell(&create_test_graph(), None).unwrap();
        let json = serde_json::to_string(&coloring).unwrap();
        let back: Coloring = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coloring);
    }
}
