//! Node and edge records of the social graph.

use serde::{Deserialize, Serialize};
use socnet_core::NodeId;

// ============================================================================
// Node
// ============================================================================

/// An actor in the social graph.
///
/// `activity` and `interaction` are free attributes used by weight functions
/// and heuristics. `degree` is a cache of the number of distinct neighbors
/// and is maintained exclusively by [`Graph`](crate::Graph).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, immutable identifier.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Activity level, conventionally in `[0, 1]` (not enforced).
    pub activity: f64,
    /// Interaction count.
    pub interaction: u64,
    #[serde(default)]
    pub(crate) degree: usize,
}

impl Node {
    /// Create a node with zeroed attributes.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            activity: 0.0,
            interaction: 0,
            degree: 0,
        }
    }

    /// Create a node named `Node{id}`, the label used when a name is absent.
    pub fn unnamed(id: NodeId) -> Self {
        Self::new(id, default_name(id))
    }

    /// Set the activity attribute.
    pub fn with_activity(mut self, activity: f64) -> Self {
        self.activity = activity;
        self
    }

    /// Set the interaction attribute.
    pub fn with_interaction(mut self, interaction: u64) -> Self {
        self.interaction = interaction;
        self
    }

    /// Number of distinct neighbors.
    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// Generated display label for a node without a name.
pub fn default_name(id: NodeId) -> String {
    format!("Node{id}")
}

// ============================================================================
// Edge
// ============================================================================

/// One directed half of an undirected connection.
///
/// The graph always stores `a -> b` and `b -> a` together with the same
/// weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id.
    pub from: NodeId,
    /// Target node id.
    pub to: NodeId,
    /// Edge weight.
    pub weight: f64,
}

impl Edge {
    /// Create a directed edge record.
    pub fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Self { from, to, weight }
    }

    /// The same connection seen from the other endpoint.
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }
}

// ============================================================================
// Tests
// ============================================================================
