//! Breadth-first and depth-first traversal.

use socnet_core::{Error, NodeId, Result};
use std::collections::VecDeque;

use crate::Graph;

/// Nodes reachable from `start`, in breadth-first discovery order.
///
/// # Errors
///
/// [`Error::NotFound`] if `start` is absent.
pub fn bfs(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    let source = graph
        .position(start)
        .ok_or_else(|| Error::node_not_found(start))?;
    Ok(bfs_from(graph, source, &mut vec![false; graph.node_count()]))
}

/// Nodes reachable from `start`, in depth-first discovery order.
///
/// Iterative; neighbors are pushed in reverse so they pop in adjacency
/// order, matching a recursive left-to-right walk.
///
/// # Errors
///
/// [`Error::NotFound`] if `start` is absent.
pub fn dfs(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    let source = graph
        .position(start)
        .ok_or_else(|| Error::node_not_found(start))?;

    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    let mut stack = vec![source];

    while let Some(u) = stack.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        order.push(graph.node_at(u).id);

        for edge in graph.edges_at(u).iter().rev() {
            if let Some(v) = graph.position(edge.to) {
                if !visited[v] {
                    stack.push(v);
                }
            }
        }
    }

    Ok(order)
}

/// Breadth-first walk from an arena position, sharing the visited marks with
/// the caller so repeated walks partition the graph.
pub(crate) fn bfs_from(graph: &Graph, source: usize, visited: &mut [bool]) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut queue = VecDeque::from([source]);
    visited[source] = true;

    while let Some(u) = queue.pop_front() {
        order.push(graph.node_at(u).id);
        for edge in graph.edges_at(u) {
            if let Some(v) = graph.position(edge.to) {
                if !visited[v] {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }
    }

    order
}

// ============================================================================
// Tests
// ============================================================================
