use snafu::Snafu;

use crate::NodeId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Size bounds are non-positive or inconsistent.
    #[snafu(display(
        "invalid configuration (dim={dim}, min_size={min_size}, tnode_max_size={tnode_max_size}): {reason}"
    ))]
    InvalidConfiguration { dim: usize, min_size: usize, tnode_max_size: usize, reason: &'static str },

    /// No Terminal/And alternative exists for a range the root depends on.
    #[snafu(display("range [{lo}, {hi}) admits no decomposition under the configured size bounds"))]
    Undecomposable { lo: usize, hi: usize },

    #[snafu(display("graph has no nodes"))]
    EmptyGraph,

    #[snafu(display("node {node} references missing child {child}"))]
    DanglingChild { node: NodeId, child: NodeId },

    /// Children of an And node do not tile its range.
    #[snafu(display("node {node} children do not tile [{lo}, {hi}): gap or overlap at {at}"))]
    TilingViolation { node: NodeId, lo: usize, hi: usize, at: usize },

    /// Or alternative is another Or node or covers a different range.
    #[snafu(display("node {node} has invalid alternative {alternative}"))]
    InvalidAlternative { node: NodeId, alternative: NodeId },

    #[snafu(display("node {node} has too few children: {count} < {min}"))]
    TooFewChildren { node: NodeId, count: usize, min: usize },

    #[snafu(display("terminal {node} has length {len} outside [{min_size}, {max_size}]"))]
    TerminalOutOfBounds { node: NodeId, len: usize, min_size: usize, max_size: usize },

    #[snafu(display("root covers [{lo}, {hi}) instead of [0, {dim})"))]
    RootRange { lo: usize, hi: usize, dim: usize },

    #[snafu(display("cycle detected through node {node}"))]
    Cycle { node: NodeId },
}
