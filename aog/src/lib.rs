//! AND-OR graph (AOG) construction for ordered 1-D domains.
//!
//! An AOG describes every admissible way to split `[0, N)` into contiguous
//! sub-ranges. Terminal nodes are leaf ranges, And nodes compose an ordered
//! partition, Or nodes collect alternative decompositions of one range.
//! Structurally identical sub-decompositions are shared, so the result is a
//! DAG rather than a tree.
//!
//! # Module Organization
//!
//! - [`range`] - Half-open intervals over the domain
//! - [`node`] - Node ids and the Terminal/And/Or sum type
//! - [`config`] - Per-dimension size bounds
//! - [`builder`] - Memoized construction
//! - [`graph`] - The immutable graph, toposort and validation
//! - [`tree`] - ASCII rendering
//! - [`error`] - Error types and result handling

pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
mod intern;
pub mod node;
pub mod range;
pub mod tree;


pub use builder::{BuildContext, build, build_all};
pub use config::AogConfig;
pub use error::{Error, Result};
pub use graph::{AOGraph, GraphStats};
pub use node::{AogNode, NodeId, NodeKind};
pub use range::Range;
