//! Attribute-weighted social graph analysis.
//!
//! This crate provides the graph store, its flat-file persistence, and the
//! classical algorithms run over it.
//!
//! # Key Abstractions
//!
//! - [`Graph`]: undirected store with symmetric edge records and a degree
//!   cache, nodes kept in insertion order
//! - [`WeightFunction`]: derives an edge weight from its endpoints when the
//!   edge is added
//! - [`GraphLoader`]: config-driven load, save, and load-or-initialise
//! - [`SharedGraph`]: lock-guarded handle for multi-threaded hosts
//!
//! # Example
//!
//! ```
//! use socnet_graph::{connected_components, dijkstra, sample_graph};
//!
//! let graph = sample_graph()?;
//! let paths = dijkstra(&graph, 1)?;
//! assert_eq!(paths.path_to(5), vec![1, 3, 4, 5]);
//! assert_eq!(connected_components(&graph).len(), 1);
//! # Ok::<(), socnet_graph::Error>(())
//! ```

#![doc = include_str!("../README.md")]

pub mod algorithms;
pub mod loader;
pub mod persistence;
pub mod sample;
pub mod shared;
pub mod store;
pub mod types;
pub mod validation;
pub mod weight;

// Re-exports
pub use algorithms::*;
pub use loader::GraphLoader;
pub use persistence::{
    CsvOptions, ExportOptions, ImportStats, export_csv, from_csv_reader, from_csv_str,
    import_csv, read_csv_with_stats, to_csv_string, to_csv_writer,
};
pub use sample::sample_graph;
pub use shared::SharedGraph;
pub use store::{AdjacencyMatrix, Graph};
pub use types::{Edge, Node, default_name};
pub use validation::{ValidationIssue, ValidationResult, is_valid, validate_graph};
pub use weight::{AttributeSimilarity, UnitWeight, WeightFunction, attribute_similarity};

pub use socnet_core::{Error, NodeId, Result};
