//! Edge weight functions.
//!
//! A weight function maps a pair of nodes to the weight of the edge between
//! them. It is supplied by the caller whenever edges are derived from node
//! attributes (CSV import, [`Graph::add_weighted_edge`](crate::Graph::add_weighted_edge)).
//!
//! Weight functions are evaluated against the endpoints' state *at the time
//! the edge is added*, degree included, so the order in which edges are
//! inserted can change the resulting weights.

use crate::Node;

/// Pure function from a node pair to an edge weight.
///
/// Implemented for every `Fn(&Node, &Node) -> f64`, so closures can be passed
/// directly:
///
/// ```
/// use socnet_graph::{Node, WeightFunction};
///
/// let by_activity = |a: &Node, b: &Node| (a.activity - b.activity).abs();
/// let a = Node::new(1, "a").with_activity(0.9);
/// let b = Node::new(2, "b").with_activity(0.4);
/// assert!((by_activity.weight(&a, &b) - 0.5).abs() < 1e-12);
/// ```
pub trait WeightFunction {
    /// Weight of the edge between `a` and `b`.
    fn weight(&self, a: &Node, b: &Node) -> f64;
}

impl<F> WeightFunction for F
where
    F: Fn(&Node, &Node) -> f64,
{
    fn weight(&self, a: &Node, b: &Node) -> f64 {
        self(a, b)
    }
}

/// The default attribute-similarity weight.
///
/// `w(a, b) = 1 / (1 + Δactivity² + Δinteraction² + Δdegree²)`
///
/// Symmetric, always in `(0, 1]`, never zero or negative, which keeps
/// Dijkstra and A* within their non-negative-weight precondition.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttributeSimilarity;

impl WeightFunction for AttributeSimilarity {
    fn weight(&self, a: &Node, b: &Node) -> f64 {
        attribute_similarity(a, b)
    }
}

/// Free-function form of [`AttributeSimilarity`].
pub fn attribute_similarity(a: &Node, b: &Node) -> f64 {
    let da = a.activity - b.activity;
    let di = a.interaction as f64 - b.interaction as f64;
    let dd = a.degree() as f64 - b.degree() as f64;
    1.0 / (1.0 + da * da + di * di + dd * dd)
}

/// Constant weight of 1.0, for hand-drawn edges with no derived weight.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitWeight;

impl WeightFunction for UnitWeight {
    fn weight(&self, _a: &Node, _b: &Node) -> f64 {
        1.0
    }
}

// ============================================================================
// Tests
// ============================================================================
