//! The immutable AND-OR graph.

use smallvec::SmallVec;
use snafu::{OptionExt, ensure};

use crate::error::*;
use crate::{AogConfig, AogNode, NodeId, NodeKind};

/// A finite, acyclic AND-OR graph over the ranges of `[0, dim)`.
///
/// Built graphs are stored in canonical order: nodes are numbered by a
/// post-order walk from the root (children in order), so every child id is
/// smaller than its parents' ids and the root is the last node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AOGraph {
    nodes: Vec<AogNode>,
    root: NodeId,
    config: AogConfig,
}

/// Node counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub terminals: usize,
    pub ands: usize,
    pub ors: usize,
    pub edges: usize,
    /// Nodes with more than one parent.
    pub shared: usize,
}

impl GraphStats {
    pub fn total(&self) -> usize {
        self.terminals + self.ands + self.ors
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Open,
    Done,
}

/// Post-order walk from `root`; children before parents.
fn post_order(nodes: &[AogNode], root: NodeId) -> Result<Vec<NodeId>> {
    ensure!(!nodes.is_empty(), EmptyGraphSnafu);
    ensure!(root.index() < nodes.len(), DanglingChildSnafu { node: root, child: root });

    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());
    // (node, index of the next source to visit)
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    marks[root.index()] = Mark::Open;

    while let Some((id, next)) = stack.last_mut() {
        let node = &nodes[id.index()];
        match node.sources().get(*next) {
            Some(&child) => {
                *next += 1;
                let parent = *id;
                let mark = marks.get(child.index()).copied().context(DanglingChildSnafu { node: parent, child })?;
                match mark {
                    Mark::Unvisited => {
                        marks[child.index()] = Mark::Open;
                        stack.push((child, 0));
                    }
                    Mark::Open => return CycleSnafu { node: child }.fail(),
                    Mark::Done => {}
                }
            }
            None => {
                marks[id.index()] = Mark::Done;
                order.push(*id);
                stack.pop();
            }
        }
    }

    Ok(order)
}

impl AOGraph {
    /// Renumber a freshly built arena into canonical order, dropping nodes the
    /// root does not reach.
    ///
    /// Fails on dangling references and cycles, which a correct builder never
    /// produces.
    pub(crate) fn canonical(arena: Vec<AogNode>, root: NodeId, config: AogConfig) -> Result<Self> {
        let order = post_order(&arena, root)?;

        let mut remap = vec![NodeId(u32::MAX); arena.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.index()] = NodeId::from(new);
        }

        let nodes: Vec<AogNode> = order.iter().map(|old| arena[old.index()].remap(|c| remap[c.index()])).collect();
        let root = NodeId::from(nodes.len().saturating_sub(1));
        Ok(Self { nodes, root, config })
    }

    /// Assemble a graph from raw parts without checking any invariant.
    ///
    /// Use [`AOGraph::validate`] to check the result.
    pub fn from_parts(nodes: Vec<AogNode>, root: NodeId, config: AogConfig) -> Self {
        Self { nodes, root, config }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> Option<&AogNode> {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> Option<&AogNode> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[AogNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AogNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId::from(i), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn config(&self) -> &AogConfig {
        &self.config
    }

    /// Nodes reachable from the root, children before parents.
    ///
    /// Fails on dangling references and cycles.
    pub fn toposort(&self) -> Result<Vec<NodeId>> {
        post_order(&self.nodes, self.root)
    }

    /// Parents of every node, indexed by node id. Dangling edges are skipped.
    pub fn parents(&self) -> Vec<SmallVec<[NodeId; 4]>> {
        let mut parents = vec![SmallVec::new(); self.nodes.len()];
        for (id, node) in self.iter() {
            for &src in node.sources() {
                if let Some(list) = parents.get_mut(src.index()) {
                    list.push(id);
                }
            }
        }
        parents
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for node in &self.nodes {
            match node.kind() {
                NodeKind::Terminal => stats.terminals += 1,
                NodeKind::And => stats.ands += 1,
                NodeKind::Or => stats.ors += 1,
            }
            stats.edges += node.sources().len();
        }
        stats.shared = self.parents().iter().filter(|p| p.len() > 1).count();
        stats
    }

    /// Check every structural invariant of the graph.
    pub fn validate(&self) -> Result<()> {
        self.toposort()?;

        let root = self.node(self.root).context(EmptyGraphSnafu)?.range();
        ensure!(
            root.lo == 0 && root.hi == self.config.dim,
            RootRangeSnafu { lo: root.lo, hi: root.hi, dim: self.config.dim }
        );

        for (id, node) in self.iter() {
            match node {
                AogNode::Terminal { range } => ensure!(
                    self.config.admits_terminal(range.len()),
                    TerminalOutOfBoundsSnafu {
                        node: id,
                        len: range.len(),
                        min_size: self.config.min_size,
                        max_size: self.config.tnode_max_size,
                    }
                ),
                AogNode::And { range, children } => {
                    ensure!(children.len() >= 2, TooFewChildrenSnafu { node: id, count: children.len(), min: 2usize });
                    let mut cursor = range.lo;
                    for &child in children {
                        let child_range =
                            self.node(child).context(DanglingChildSnafu { node: id, child })?.range();
                        ensure!(
                            child_range.lo == cursor,
                            TilingViolationSnafu { node: id, lo: range.lo, hi: range.hi, at: cursor }
                        );
                        cursor = child_range.hi;
                    }
                    ensure!(cursor == range.hi, TilingViolationSnafu { node: id, lo: range.lo, hi: range.hi, at: cursor });
                }
                AogNode::Or { range, alternatives } => {
                    ensure!(
                        !alternatives.is_empty(),
                        TooFewChildrenSnafu { node: id, count: 0usize, min: 1usize }
                    );
                    for &alternative in alternatives {
                        let alt = self.node(alternative).context(DanglingChildSnafu { node: id, child: alternative })?;
                        ensure!(
                            !alt.is_or() && alt.range() == *range,
                            InvalidAlternativeSnafu { node: id, alternative }
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
