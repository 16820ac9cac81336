//! Thread-safe shared graph handle.
//!
//! [`SharedGraph`] wraps a [`Graph`] in `Arc<RwLock<_>>` so that several
//! threads can query it while one at a time mutates it. Cloning the handle
//! is cheap and every clone sees the same graph.
//!
//! # Example
//!
//! ```
//! use socnet_graph::{Node, SharedGraph, bfs};
//!
//! let shared = SharedGraph::default();
//! shared.write(|g| {
//!     g.add_node(Node::unnamed(1))?;
//!     g.add_node(Node::unnamed(2))?;
//!     g.add_undirected_edge(1, 2, 1.0)
//! })?;
//!
//! let order = shared.read(|g| bfs(g, 1))?;
//! assert_eq!(order, vec![1, 2]);
//! # Ok::<(), socnet_graph::Error>(())
//! ```

use log::warn;
use socnet_core::{Error, Result};
use std::sync::{Arc, RwLock};

use crate::Graph;

/// Cloneable handle to a graph behind a single reader/writer lock.
#[derive(Clone, Debug, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<Graph>>,
}

impl SharedGraph {
    /// Wrap an existing graph.
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Run `f` with shared read access.
    ///
    /// # Errors
    ///
    /// [`Error::Poisoned`] if a writer panicked while holding the lock, or
    /// whatever `f` returns.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Graph) -> Result<T>,
    {
        let guard = self.inner.read().map_err(|e| {
            warn!("graph read lock poisoned");
            Error::Poisoned(e.to_string())
        })?;
        f(&guard)
    }

    /// Run `f` with exclusive write access.
    ///
    /// # Errors
    ///
    /// [`Error::Poisoned`] if a writer panicked while holding the lock, or
    /// whatever `f` returns.
    pub fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Graph) -> Result<T>,
    {
        let mut guard = self.inner.write().map_err(|e| {
            warn!("graph write lock poisoned");
            Error::Poisoned(e.to_string())
        })?;
        f(&mut guard)
    }

    /// Clone the current graph out of the lock.
    pub fn snapshot(&self) -> Result<Graph> {
        self.read(|g| Ok(g.clone()))
    }

    /// Unwrap the graph if this is the last handle, otherwise clone it.
    pub fn into_inner(self) -> Result<Graph> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => lock
                .into_inner()
                .map_err(|e| Error::Poisoned(e.to_string())),
            Err(inner) => Self { inner }.snapshot(),
        }
    }
}

impl From<Graph> for SharedGraph {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}

// ============================================================================
// Tests
// ============================================================================
