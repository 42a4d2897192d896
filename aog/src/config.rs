//! Per-dimension AOG configuration.

use bon::bon;
use snafu::ensure;

use crate::error::*;

/// Size bounds for building the AOG of one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AogConfig {
    /// Domain size N; the root covers `[0, dim)`.
    pub dim: usize,
    /// Smallest admissible Terminal length.
    pub min_size: usize,
    /// Largest admissible Terminal length.
    pub tnode_max_size: usize,
    /// Use unit-length Terminals directly instead of wrapping each in a
    /// single-alternative Or node.
    pub turn_off_unit_or_node: bool,
    /// Enumerate cut points on the rayon pool.
    pub parallel: bool,
}

#[bon]
impl AogConfig {
    #[builder]
    pub fn builder(
        dim: usize,
        #[builder(default = 1)] min_size: usize,
        tnode_max_size: Option<usize>,
        #[builder(default = true)] turn_off_unit_or_node: bool,
        #[builder(default = false)] parallel: bool,
    ) -> Self {
        Self { dim, min_size, tnode_max_size: tnode_max_size.unwrap_or(dim), turn_off_unit_or_node, parallel }
    }
}

impl AogConfig {
    pub fn new(dim: usize, min_size: usize, tnode_max_size: usize, turn_off_unit_or_node: bool) -> Self {
        Self { dim, min_size, tnode_max_size, turn_off_unit_or_node, parallel: false }
    }

    /// Check the size bounds before any node is built.
    pub fn validate(&self) -> Result<()> {
        let ctx = |reason| InvalidConfigurationSnafu {
            dim: self.dim,
            min_size: self.min_size,
            tnode_max_size: self.tnode_max_size,
            reason,
        };
        ensure!(self.min_size >= 1, ctx("min_size must be positive"));
        ensure!(self.dim >= self.min_size, ctx("dim must be at least min_size"));
        ensure!(self.tnode_max_size >= self.min_size, ctx("tnode_max_size must be at least min_size"));
        Ok(())
    }

    /// Whether a range of `len` may be a Terminal.
    pub fn admits_terminal(&self, len: usize) -> bool {
        self.min_size <= len && len <= self.tnode_max_size
    }
}
