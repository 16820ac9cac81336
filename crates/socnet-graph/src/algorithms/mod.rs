//! Graph algorithms.
//!
//! One module per algorithm family, each with its own typed entry points:
//!
//! - [`traversal`]: breadth- and depth-first discovery order
//! - [`shortest_path`]: Dijkstra, A*, and path reconstruction
//! - [`components`]: connected components
//! - [`centrality`]: degree centrality ranking
//! - [`coloring`]: Welsh–Powell greedy coloring
//!
//! All of them borrow the graph immutably and return owned results, so the
//! graph cannot change underneath a running algorithm.

pub mod centrality;
pub mod coloring;
pub mod components;
pub mod shortest_path;
pub mod traversal;

pub use centrality::{CentralityRow, degree_centrality, top_k_degree_centrality};
pub use coloring::{Coloring, ColoringRow, welsh_powell};
pub use components::{component_index_map, connected_components};
pub use shortest_path::{
    AttributeHeuristic, Heuristic, PathResult, ShortestPaths, ZeroHeuristic, astar, astar_path,
    astar_with, dijkstra, reconstruct_path, shortest_path,
};
pub use traversal::{bfs, dfs};
