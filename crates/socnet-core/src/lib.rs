//! Socnet Core: shared errors, configuration, and identifiers.
//!
//! This crate provides the foundational types used across all socnet crates.
//! It has no internal socnet dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration provider trait
//! - [`config`]: File/environment backed configuration

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod traits;

// Re-export key types at crate root for convenience
pub use config::{GraphFileConfig, SocnetConfig};
pub use error::{Error, Result};
pub use traits::ConfigProvider;

/// Identifier of a node (actor) in a social graph.
///
/// Ids are assigned by the caller, never reused within one graph, and
/// immutable once a node has been inserted.
pub type NodeId = u64;
