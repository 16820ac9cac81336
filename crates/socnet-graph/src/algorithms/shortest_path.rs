//! Weighted shortest paths: Dijkstra, A*, and path reconstruction.
//!
//! Both searches share one priority-queue core. The queue is a binary
//! min-heap with lazy decrease-key: improved distances push a fresh entry
//! and stale entries are skipped when popped. Ties on priority are broken
//! by the smaller node id, so results are deterministic for a given graph.
//!
//! Edge weights must be non-negative. A search that meets a negative or NaN
//! weight fails with [`Error::InvalidWeight`] before exploring anything.
//!
//! An unreachable target is not an error. [`ShortestPaths::distance`] returns
//! `None` for it and [`ShortestPaths::path_to`] returns an empty path.

use serde::{Deserialize, Serialize};
use socnet_core::{Error, NodeId, Result};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use crate::{Graph, Node};

// ============================================================================
// Heuristics
// ============================================================================

/// Estimate of the remaining cost from a node to the search goal.
///
/// A* returns optimal paths only when the estimate never exceeds the true
/// remaining cost. Inadmissible heuristics are accepted; the search still
/// terminates but the path it reports may be longer than necessary.
pub trait Heuristic {
    /// Estimated cost from `node` to the goal.
    fn estimate(&self, node: NodeId) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(NodeId) -> f64,
{
    fn estimate(&self, node: NodeId) -> f64 {
        self(node)
    }
}

/// The zero heuristic. A* with it settles nodes exactly like Dijkstra.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _node: NodeId) -> f64 {
        0.0
    }
}

/// Attribute distance to a fixed goal node.
///
/// `h(n) = |activity(n) - activity(goal)| + |interaction(n) - interaction(goal)| / 100`
///
/// Ids not present in the graph estimate to zero.
#[derive(Clone, Copy, Debug)]
pub struct AttributeHeuristic<'g> {
    graph: &'g Graph,
    goal: &'g Node,
}

impl<'g> AttributeHeuristic<'g> {
    /// Build the heuristic for `goal`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `goal` is absent.
    pub fn new(graph: &'g Graph, goal: NodeId) -> Result<Self> {
        let goal = graph.node(goal).ok_or_else(|| Error::node_not_found(goal))?;
        Ok(Self { graph, goal })
    }
}

impl Heuristic for AttributeHeuristic<'_> {
    fn estimate(&self, node: NodeId) -> f64 {
        self.graph.node(node).map_or(0.0, |n| {
            let activity = (n.activity - self.goal.activity).abs();
            let interaction = n.interaction.abs_diff(self.goal.interaction) as f64;
            activity + interaction / 100.0
        })
    }
}

// ============================================================================
// Result types
// ============================================================================

/// Distances and predecessors from one source.
///
/// Produced by [`dijkstra`] (every node reachable from the source is settled)
/// and [`astar`] / [`astar_with`] (settling stops at the target, so nodes
/// beyond it may be unreached or carry non-final distances).
#[derive(Clone, Debug)]
pub struct ShortestPaths {
    source: NodeId,
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    dist: Vec<f64>,
    prev: Vec<Option<usize>>,
    settled: Vec<NodeId>,
}

impl ShortestPaths {
    fn init(graph: &Graph, source: NodeId) -> Self {
        let ids: Vec<NodeId> = graph.node_ids().collect();
        let index = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        let n = ids.len();
        Self {
            source,
            ids,
            index,
            dist: vec![f64::INFINITY; n],
            prev: vec![None; n],
            settled: Vec::new(),
        }
    }

    /// The node the search started from.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Distance to `id`, or `None` if it was not reached or is unknown.
    pub fn distance(&self, id: NodeId) -> Option<f64> {
        let d = self.raw_distance(id);
        d.is_finite().then_some(d)
    }

    /// Distance to `id`, with `f64::INFINITY` for unreached or unknown ids.
    pub fn raw_distance(&self, id: NodeId) -> f64 {
        self.index.get(&id).map_or(f64::INFINITY, |&pos| self.dist[pos])
    }

    /// The node preceding `id` on its best known path.
    ///
    /// `None` for the source, for unreached nodes, and for unknown ids.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let pos = *self.index.get(&id)?;
        self.prev[pos].map(|p| self.ids[p])
    }

    /// Whether `id` was reached.
    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.distance(id).is_some()
    }

    /// Every node's distance, `f64::INFINITY` for unreached ones.
    pub fn distances(&self) -> BTreeMap<NodeId, f64> {
        self.ids.iter().copied().zip(self.dist.iter().copied()).collect()
    }

    /// Every node's predecessor.
    pub fn predecessors(&self) -> BTreeMap<NodeId, Option<NodeId>> {
        self.ids
            .iter()
            .zip(&self.prev)
            .map(|(&id, p)| (id, p.map(|p| self.ids[p])))
            .collect()
    }

    /// Nodes in the order the search expanded them.
    ///
    /// A node reopened by [`astar_with`] after a cheaper route was found
    /// appears once per expansion.
    pub fn settled_order(&self) -> &[NodeId] {
        &self.settled
    }

    /// Path from the source to `target` following predecessors.
    ///
    /// `[source]` when `target` is the source; empty when `target` was not
    /// reached or is unknown.
    pub fn path_to(&self, target: NodeId) -> Vec<NodeId> {
        let Some(&pos) = self.index.get(&target) else {
            return Vec::new();
        };
        if !self.dist[pos].is_finite() {
            return Vec::new();
        }

        let mut path = vec![self.ids[pos]];
        let mut current = pos;
        while let Some(p) = self.prev[current] {
            // Predecessor chains are acyclic and never longer than the arena.
            if path.len() > self.ids.len() {
                break;
            }
            path.push(self.ids[p]);
            current = p;
        }
        path.reverse();
        path
    }
}

/// A single source-to-goal query result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Total path weight, `None` if the goal is unreachable.
    pub distance: Option<f64>,
    /// Nodes from start to goal inclusive; empty if unreachable.
    pub path: Vec<NodeId>,
    /// Nodes in the order they were expanded.
    pub visited_order: Vec<NodeId>,
}

impl PathResult {
    /// Whether the goal was reached.
    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Single-source Dijkstra over the whole reachable component.
///
/// # Errors
///
/// [`Error::NotFound`] if `source` is absent, [`Error::InvalidWeight`] if any
/// edge weight is negative or NaN.
pub fn dijkstra(graph: &Graph, source: NodeId) -> Result<ShortestPaths> {
    let s = require(graph, source)?;
    check_weights(graph)?;
    Ok(search(graph, s, None, &ZeroHeuristic, Revisit::SkipStale))
}

/// A* from `source` to `target` with the zero heuristic.
///
/// # Errors
///
/// As [`astar_with`].
pub fn astar(graph: &Graph, source: NodeId, target: NodeId) -> Result<ShortestPaths> {
    astar_with(graph, source, target, &ZeroHeuristic)
}

/// A* from `source` to `target` guided by `heuristic`.
///
/// Stops as soon as `target` is settled. Use [`ShortestPaths::path_to`] or
/// [`reconstruct_path`] to read the path.
///
/// # Errors
///
/// [`Error::NotFound`] if either endpoint is absent, [`Error::InvalidWeight`]
/// if any edge weight is negative or NaN.
pub fn astar_with<H>(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
    heuristic: &H,
) -> Result<ShortestPaths>
where
    H: Heuristic + ?Sized,
{
    let s = require(graph, source)?;
    let t = require(graph, target)?;
    check_weights(graph)?;
    Ok(search(graph, s, Some(t), heuristic, Revisit::SkipStale))
}

/// Path from the search source to `target`. See [`ShortestPaths::path_to`].
pub fn reconstruct_path(paths: &ShortestPaths, target: NodeId) -> Vec<NodeId> {
    paths.path_to(target)
}

/// Shortest path between two nodes, expanding each node at most once.
///
/// # Errors
///
/// As [`astar_path`].
pub fn shortest_path(graph: &Graph, start: NodeId, goal: NodeId) -> Result<PathResult> {
    astar_path(graph, start, goal, &ZeroHeuristic)
}

/// Heuristic-guided path between two nodes, expanding each node at most once.
///
/// Unlike [`astar_with`], a node is closed once expanded and never reopened,
/// even if an inadmissible heuristic later finds it a cheaper route.
///
/// # Errors
///
/// [`Error::NotFound`] if either endpoint is absent, [`Error::InvalidWeight`]
/// if any edge weight is negative or NaN.
pub fn astar_path<H>(graph: &Graph, start: NodeId, goal: NodeId, heuristic: &H) -> Result<PathResult>
where
    H: Heuristic + ?Sized,
{
    let s = require(graph, start)?;
    let t = require(graph, goal)?;
    check_weights(graph)?;

    let paths = search(graph, s, Some(t), heuristic, Revisit::Closed);
    Ok(PathResult {
        distance: paths.distance(goal),
        path: paths.path_to(goal),
        visited_order: paths.settled,
    })
}

// ============================================================================
// Search core
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Revisit {
    /// Skip popped entries whose cost is worse than the current best.
    SkipStale,
    /// Expand each node at most once.
    Closed,
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest priority first,
/// then the smallest cost, then the smallest node id.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    priority: f64,
    cost: f64,
    node: NodeId,
    pos: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.cost.total_cmp(&self.cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn search<H>(
    graph: &Graph,
    source: usize,
    target: Option<usize>,
    heuristic: &H,
    revisit: Revisit,
) -> ShortestPaths
where
    H: Heuristic + ?Sized,
{
    let source_id = graph.node_at(source).id;
    let mut paths = ShortestPaths::init(graph, source_id);
    let mut closed = vec![false; graph.node_count()];
    let mut heap = BinaryHeap::new();

    paths.dist[source] = 0.0;
    heap.push(FrontierEntry {
        priority: heuristic.estimate(source_id),
        cost: 0.0,
        node: source_id,
        pos: source,
    });

    while let Some(entry) = heap.pop() {
        let u = entry.pos;
        match revisit {
            Revisit::Closed if closed[u] => continue,
            Revisit::SkipStale if entry.cost > paths.dist[u] => continue,
            _ => {}
        }
        closed[u] = true;
        paths.settled.push(entry.node);

        if target == Some(u) {
            break;
        }

        let base = paths.dist[u];
        for edge in graph.edges_at(u) {
            let Some(v) = graph.position(edge.to) else {
                continue;
            };
            if revisit == Revisit::Closed && closed[v] {
                continue;
            }
            let cost = base + edge.weight;
            if cost < paths.dist[v] {
                paths.dist[v] = cost;
                paths.prev[v] = Some(u);
                heap.push(FrontierEntry {
                    priority: cost + heuristic.estimate(edge.to),
                    cost,
                    node: edge.to,
                    pos: v,
                });
            }
        }
    }

    paths
}

fn require(graph: &Graph, id: NodeId) -> Result<usize> {
    graph.position(id).ok_or_else(|| Error::node_not_found(id))
}

fn check_weights(graph: &Graph) -> Result<()> {
    for (_, edges) in graph.adjacency_raw() {
        if let Some(edge) = edges.iter().find(|e| e.weight.is_nan() || e.weight < 0.0) {
            return Err(Error::InvalidWeight {
                from: edge.from,
                to: edge.to,
                weight: edge.weight,
            });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
