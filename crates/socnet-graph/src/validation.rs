//! Graph integrity checking.
//!
//! [`Graph`] keeps its invariants on every mutation, so a store built only
//! through its API always validates. These checks exist for hosts that want
//! to confirm that after bulk imports, and for tests.

use serde::{Deserialize, Serialize};
use socnet_core::NodeId;
use std::collections::HashSet;

use crate::Graph;

// ============================================================================
// Types
// ============================================================================

/// Result of graph validation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the graph is valid (no errors).
    pub valid: bool,
    /// Invariant violations.
    pub errors: Vec<ValidationIssue>,
    /// Suspicious but legal shapes.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    /// Add an error (marks the graph as invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether an issue with `code` was reported at any level.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.code == code)
    }
}

/// A validation issue found in the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue code, e.g. `ASYMMETRIC_EDGES`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected node ids.
    pub nodes: Vec<NodeId>,
    /// Affected directed edges as `(from, to)`.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Attach affected nodes.
    pub fn with_nodes(mut self, nodes: Vec<NodeId>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Attach affected edges.
    pub fn with_edges(mut self, edges: Vec<(NodeId, NodeId)>) -> Self {
        self.edges = edges;
        self
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a graph against the store invariants.
///
/// Errors:
/// - `SELF_LOOPS`: edge from a node to itself
/// - `DUPLICATE_EDGES`: more than one record for an ordered pair
/// - `DANGLING_EDGES`: edge to an id that is not in the graph
/// - `ASYMMETRIC_EDGES`: `a -> b` without a matching `b -> a` of equal weight
/// - `DEGREE_MISMATCH`: cached degree differs from the adjacency length
///
/// Warnings:
/// - `ISOLATED_NODES`: nodes with no neighbors
pub fn validate_graph(graph: &Graph) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_self_loops(graph, &mut result);
    check_duplicate_edges(graph, &mut result);
    check_dangling_edges(graph, &mut result);
    check_symmetry(graph, &mut result);
    check_degrees(graph, &mut result);
    check_isolated(graph, &mut result);

    result
}

/// Quick check if a graph has any validation errors.
pub fn is_valid(graph: &Graph) -> bool {
    validate_graph(graph).valid
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_self_loops(graph: &Graph, result: &mut ValidationResult) {
    let loops: Vec<(NodeId, NodeId)> = graph
        .adjacency_raw()
        .flat_map(|(_, edges)| edges.iter())
        .filter(|e| e.from == e.to)
        .map(|e| (e.from, e.to))
        .collect();

    if !loops.is_empty() {
        result.add_error(
            ValidationIssue::new("SELF_LOOPS", format!("{} self-loop(s) found", loops.len()))
                .with_edges(loops),
        );
    }
}

fn check_duplicate_edges(graph: &Graph, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for (_, edges) in graph.adjacency_raw() {
        for edge in edges {
            if !seen.insert((edge.from, edge.to)) {
                duplicates.push((edge.from, edge.to));
            }
        }
    }

    if !duplicates.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DUPLICATE_EDGES",
                format!("{} duplicate edge record(s) found", duplicates.len()),
            )
            .with_edges(duplicates),
        );
    }
}

fn check_dangling_edges(graph: &Graph, result: &mut ValidationResult) {
    let dangling: Vec<(NodeId, NodeId)> = graph
        .adjacency_raw()
        .flat_map(|(node, edges)| edges.iter().map(move |e| (node.id, e)))
        .filter(|(owner, e)| e.from != *owner || !graph.contains_node(e.to))
        .map(|(_, e)| (e.from, e.to))
        .collect();

    if !dangling.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DANGLING_EDGES",
                format!("{} edge(s) reference missing or foreign nodes", dangling.len()),
            )
            .with_edges(dangling),
        );
    }
}

fn check_symmetry(graph: &Graph, result: &mut ValidationResult) {
    let asymmetric: Vec<(NodeId, NodeId)> = graph
        .adjacency_raw()
        .flat_map(|(_, edges)| edges.iter())
        .filter(|e| {
            !graph
                .edges_from(e.to)
                .iter()
                .any(|back| back.to == e.from && back.weight.to_bits() == e.weight.to_bits())
        })
        .map(|e| (e.from, e.to))
        .collect();

    if !asymmetric.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "ASYMMETRIC_EDGES",
                format!(
                    "{} edge(s) lack a reverse record of equal weight",
                    asymmetric.len()
                ),
            )
            .with_edges(asymmetric),
        );
    }
}

fn check_degrees(graph: &Graph, result: &mut ValidationResult) {
    let drifted: Vec<NodeId> = graph
        .adjacency_raw()
        .filter(|(node, edges)| node.degree() != edges.len())
        .map(|(node, _)| node.id)
        .collect();

    if !drifted.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DEGREE_MISMATCH",
                format!("{} node(s) have a stale degree", drifted.len()),
            )
            .with_nodes(drifted),
        );
    }
}

fn check_isolated(graph: &Graph, result: &mut ValidationResult) {
    let isolated: Vec<NodeId> = graph
        .adjacency_raw()
        .filter(|(_, edges)| edges.is_empty())
        .map(|(node, _)| node.id)
        .collect();

    if !isolated.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "ISOLATED_NODES",
                format!("{} node(s) have no neighbors", isolated.len()),
            )
            .with_nodes(isolated),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
