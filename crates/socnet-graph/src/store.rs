//! The graph store.
//!
//! [`Graph`] owns node records and per-node adjacency lists. Nodes live in a
//! dense arena in insertion order; an id → position table gives O(1) lookup,
//! and algorithms use the positions directly to index their scratch arrays.
//!
//! Undirected connections are stored as two directed [`Edge`] records kept
//! symmetric. Every mutation keeps these invariants:
//!
//! - no self loops
//! - at most one record per ordered pair
//! - `a -> b` exists with weight `w` iff `b -> a` exists with weight `w`
//! - a node's `degree` equals the length of its adjacency list

use log::debug;
use serde::{Deserialize, Serialize};
use socnet_core::{Error, NodeId, Result};
use std::collections::{BTreeMap, HashMap};

use crate::weight::WeightFunction;
use crate::{Edge, Node};

// ============================================================================
// Graph
// ============================================================================

/// Undirected, attribute-weighted social graph.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<Edge>>,
    index: HashMap<NodeId, usize>,
}

/// Adjacency matrix over ascending node ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    /// Node ids in ascending order; row/column `i` belongs to `ids[i]`.
    pub ids: Vec<NodeId>,
    /// `matrix[i][j] == 1` iff an edge `ids[i] -> ids[j]` exists.
    pub matrix: Vec<Vec<u8>>,
}

impl AdjacencyMatrix {
    /// Entry for the ordered pair `(a, b)`, or `None` if either id is unknown.
    pub fn get(&self, a: NodeId, b: NodeId) -> Option<u8> {
        let i = self.ids.binary_search(&a).ok()?;
        let j = self.ids.binary_search(&b).ok()?;
        Some(self.matrix[i][j])
    }

    /// Whether the matrix equals its transpose.
    pub fn is_symmetric(&self) -> bool {
        let n = self.ids.len();
        (0..n).all(|i| (0..i).all(|j| self.matrix[i][j] == self.matrix[j][i]))
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Insert a node with an empty adjacency list.
    ///
    /// The incoming degree is discarded; a fresh node has no neighbors.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateId`] if a node with the same id exists.
    pub fn add_node(&mut self, mut node: Node) -> Result<()> {
        if self.index.contains_key(&node.id) {
            return Err(Error::DuplicateId(node.id));
        }
        node.degree = 0;
        debug!("add node {} ({})", node.id, node.name);
        self.index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Connect `a` and `b` with the given weight.
    ///
    /// Adding an edge that already exists in either direction leaves the
    /// graph unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::SelfLoop`] if `a == b`
    /// - [`Error::NotFound`] if either endpoint is missing
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<()> {
        if a == b {
            return Err(Error::SelfLoop(a));
        }
        let pa = self.require(a)?;
        let pb = self.require(b)?;

        if self.has_edge(a, b) || self.has_edge(b, a) {
            return Ok(());
        }

        self.adjacency[pa].push(Edge::new(a, b, weight));
        self.adjacency[pb].push(Edge::new(b, a, weight));
        self.nodes[pa].degree += 1;
        self.nodes[pb].degree += 1;
        debug!("add edge {a} <-> {b} (weight={weight})");
        Ok(())
    }

    /// Connect `a` and `b`, deriving the weight from their current state.
    ///
    /// Validation happens before the weight function is evaluated, so the
    /// function only ever sees existing, distinct nodes.
    pub fn add_weighted_edge<W>(&mut self, a: NodeId, b: NodeId, weight_fn: &W) -> Result<()>
    where
        W: WeightFunction + ?Sized,
    {
        if a == b {
            return Err(Error::SelfLoop(a));
        }
        let pa = self.require(a)?;
        let pb = self.require(b)?;
        let weight = weight_fn.weight(&self.nodes[pa], &self.nodes[pb]);
        self.add_undirected_edge(a, b, weight)
    }

    /// Remove a node and every edge touching it.
    ///
    /// Neighbor degrees are decremented; the remaining nodes keep their
    /// relative insertion order. Returns the removed node record.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the node is absent.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        let pos = self.require(id)?;

        for (edges, node) in self.adjacency.iter_mut().zip(self.nodes.iter_mut()) {
            let before = edges.len();
            edges.retain(|e| e.to != id);
            if edges.len() != before {
                node.degree = edges.len();
            }
        }

        self.adjacency.remove(pos);
        let mut removed = self.nodes.remove(pos);
        removed.degree = 0;
        self.reindex_from(pos);
        self.index.remove(&id);

        debug!("remove node {id}");
        Ok(removed)
    }

    /// Remove the undirected edge between `a` and `b`.
    ///
    /// Returns `true` if any record was removed, `false` if the nodes were
    /// not connected.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if either endpoint is missing.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        let pa = self.require(a)?;
        let pb = self.require(b)?;

        let mut removed = false;
        for (pos, other) in [(pa, b), (pb, a)] {
            let edges = &mut self.adjacency[pos];
            let before = edges.len();
            edges.retain(|e| e.to != other);
            if edges.len() != before {
                removed = true;
                self.nodes[pos].degree = edges.len();
            }
        }

        if removed {
            debug!("remove edge {a} <-> {b}");
        }
        Ok(removed)
    }

    /// Replace a node's descriptive attributes.
    ///
    /// The id, degree, and already-stored edge weights are left untouched;
    /// weights are derived once, when an edge is added.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the node is absent.
    pub fn update_node(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        activity: f64,
        interaction: u64,
    ) -> Result<()> {
        let pos = self.require(id)?;
        let node = &mut self.nodes[pos];
        node.name = name.into();
        node.activity = activity;
        node.interaction = interaction;
        debug!("update node {id}");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Neighbor ids of `id` in stored order; empty for an unknown id.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges_from(id).iter().map(|e| e.to).collect()
    }

    /// Outgoing edge records of `id` in stored order; empty for an unknown id.
    pub fn edges_from(&self, id: NodeId) -> &[Edge] {
        match self.index.get(&id) {
            Some(&pos) => &self.adjacency[pos],
            None => &[],
        }
    }

    /// Whether a directed record `a -> b` exists.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges_from(a).iter().any(|e| e.to == b)
    }

    /// Every undirected edge once, as `(smaller id, larger id, weight)`, in
    /// store order of the smaller endpoint.
    pub fn undirected_edges(&self) -> Vec<(NodeId, NodeId, f64)> {
        self.adjacency
            .iter()
            .flatten()
            .filter(|e| e.from < e.to)
            .map(|e| (e.from, e.to, e.weight))
            .collect()
    }

    /// Neighbor ids for every node, isolated nodes included.
    pub fn adjacency_list(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        self.nodes
            .iter()
            .zip(&self.adjacency)
            .map(|(node, edges)| (node.id, edges.iter().map(|e| e.to).collect()))
            .collect()
    }

    /// 0/1 adjacency matrix over ascending node ids.
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        let mut ids: Vec<NodeId> = self.node_ids().collect();
        ids.sort_unstable();
        let position: HashMap<NodeId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let n = ids.len();
        let mut matrix = vec![vec![0u8; n]; n];
        for edge in self.adjacency.iter().flatten() {
            if let (Some(&i), Some(&j)) = (position.get(&edge.from), position.get(&edge.to)) {
                matrix[i][j] = 1;
            }
        }

        AdjacencyMatrix { ids, matrix }
    }

    /// Short human-readable size summary.
    pub fn summary(&self) -> String {
        format!("{} nodes, {} edges", self.node_count(), self.edge_count())
    }

    // ------------------------------------------------------------------------
    // Arena access for algorithms
    // ------------------------------------------------------------------------

    /// Arena position of `id`.
    pub(crate) fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Node stored at an arena position.
    pub(crate) fn node_at(&self, pos: usize) -> &Node {
        &self.nodes[pos]
    }

    /// Outgoing edges stored at an arena position.
    pub(crate) fn edges_at(&self, pos: usize) -> &[Edge] {
        &self.adjacency[pos]
    }

    /// Raw directed records, for integrity checks.
    pub(crate) fn adjacency_raw(&self) -> impl Iterator<Item = (&Node, &[Edge])> {
        self.nodes.iter().zip(self.adjacency.iter().map(Vec::as_slice))
    }

    /// Unchecked access to the arena, for corrupting a store in tests.
    #[cfg(test)]
    pub(crate) fn raw_parts_mut(&mut self) -> (&mut Vec<Node>, &mut Vec<Vec<Edge>>) {
        (&mut self.nodes, &mut self.adjacency)
    }

    fn require(&self, id: NodeId) -> Result<usize> {
        self.position(id).ok_or_else(|| Error::node_not_found(id))
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, node) in self.nodes.iter().enumerate().skip(start) {
            self.index.insert(node.id, pos);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
