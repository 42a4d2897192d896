//! AND-OR graph node types.
//!
//! Nodes live in an index-based arena owned by [`crate::AOGraph`]; edges are
//! [`NodeId`]s into that arena, so a node can have any number of parents.

use std::fmt;

use smallvec::SmallVec;

use crate::Range;

/// Index of a node in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Child list. Binary splits are by far the common case.
pub type Children = SmallVec<[NodeId; 2]>;

/// Alternative list of an Or node.
pub type Alternatives = SmallVec<[NodeId; 4]>;

/// Node kind without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumIter, strum::EnumCount)]
pub enum NodeKind {
    #[strum(serialize = "T")]
    Terminal,
    #[strum(serialize = "AND")]
    And,
    #[strum(serialize = "OR")]
    Or,
}

/// A node of the AND-OR graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AogNode {
    /// Leaf bound directly to a base range of the input.
    Terminal { range: Range },
    /// Ordered composition; children tile `range` left to right.
    And { range: Range, children: Children },
    /// Alternatives over the same `range`; each is a Terminal or an And.
    Or { range: Range, alternatives: Alternatives },
}

impl AogNode {
    pub fn range(&self) -> Range {
        match self {
            Self::Terminal { range } | Self::And { range, .. } | Self::Or { range, .. } => *range,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Terminal { .. } => NodeKind::Terminal,
            Self::And { .. } => NodeKind::And,
            Self::Or { .. } => NodeKind::Or,
        }
    }

    /// Outgoing edges in order (children for And, alternatives for Or).
    pub fn sources(&self) -> &[NodeId] {
        match self {
            Self::Terminal { .. } => &[],
            Self::And { children, .. } => children,
            Self::Or { alternatives, .. } => alternatives,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }

    pub fn is_or(&self) -> bool {
        matches!(self, Self::Or { .. })
    }

    /// Rewrite every edge through `f`. Used when the arena is renumbered.
    pub(crate) fn remap(&self, f: impl Fn(NodeId) -> NodeId) -> Self {
        match self {
            Self::Terminal { range } => Self::Terminal { range: *range },
            Self::And { range, children } => {
                Self::And { range: *range, children: children.iter().map(|&c| f(c)).collect() }
            }
            Self::Or { range, alternatives } => {
                Self::Or { range: *range, alternatives: alternatives.iter().map(|&a| f(a)).collect() }
            }
        }
    }
}

impl fmt::Display for AogNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind(), self.range())
    }
}
