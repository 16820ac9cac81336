//! Error types for socnet operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all socnet crates. Uses `thiserror` for derive macros.
//!
//! Shortest-path queries that cannot reach their target are *not* errors;
//! they are reported through the result types of the algorithm modules.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::NodeId;

/// Errors that can occur in socnet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A node with this id is already present in the graph.
    #[error("Duplicate node id: {0}")]
    DuplicateId(NodeId),

    /// An edge was requested from a node to itself.
    #[error("Self-loop not allowed on node {0}")]
    SelfLoop(NodeId),

    /// An operation referenced a node that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An import record could not be parsed.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord {
        /// 1-based data line (the header is line 0).
        line: usize,
        /// What was wrong with the record.
        message: String,
    },

    /// A path search met an edge weight it cannot handle (negative or NaN).
    #[error("Invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight {
        /// Source node of the offending edge.
        from: NodeId,
        /// Target node of the offending edge.
        to: NodeId,
        /// The weight found.
        weight: f64,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// The file being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// CSV reader/writer failure not attributable to a single record.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A shared graph lock was poisoned by a panicking writer.
    #[error("Lock poisoned: {0}")]
    Poisoned(String),
}

impl Error {
    /// Create a not found error for a node id.
    pub fn node_not_found(id: NodeId) -> Self {
        Self::NotFound(format!("node {id}"))
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a malformed record error.
    pub fn malformed(line: usize, msg: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: msg.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a CSV error.
    pub fn csv(msg: impl Into<String>) -> Self {
        Self::Csv(msg.into())
    }

    /// Wrap an I/O error together with the offending path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error reports a missing node.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error reports a duplicate node id.
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Self::DuplicateId(_))
    }

    /// Whether this error reports a rejected self-loop.
    pub fn is_self_loop(&self) -> bool {
        matches!(self, Self::SelfLoop(_))
    }

    /// Whether this error reports an unusable edge weight.
    pub fn is_invalid_weight(&self) -> bool {
        matches!(self, Self::InvalidWeight { .. })
    }

    /// Whether this error reports an unparseable import record.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

/// Result type alias using socnet's Error type.
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Tests
// ============================================================================
