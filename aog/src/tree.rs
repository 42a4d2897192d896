//! ASCII rendering of AND-OR graphs.
//!
//! Shared nodes are expanded once; later occurrences print `#id → (see above)`.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::rc::Rc;

use ptree::{PrintConfig, Style, TreeItem};

use crate::{AOGraph, NodeId};

#[derive(Clone)]
pub struct AogTree<'g> {
    graph: &'g AOGraph,
    id: NodeId,
    visited: Rc<RefCell<HashSet<NodeId>>>,
    is_backref: RefCell<bool>,
}

impl<'g> AogTree<'g> {
    pub fn new(graph: &'g AOGraph) -> Self {
        Self::at(graph, graph.root(), Rc::new(RefCell::new(HashSet::new())))
    }

    fn at(graph: &'g AOGraph, id: NodeId, visited: Rc<RefCell<HashSet<NodeId>>>) -> Self {
        Self { graph, id, visited, is_backref: RefCell::new(false) }
    }
}

impl TreeItem for AogTree<'_> {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        let Some(node) = self.graph.node(self.id) else {
            return write!(f, "{} <missing>", self.id);
        };

        let mut visited = self.visited.borrow_mut();
        if !visited.insert(self.id) {
            *self.is_backref.borrow_mut() = true;
            return write!(f, "{} → (see above)", self.id);
        }
        write!(f, "{} {}", self.id, node)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        if *self.is_backref.borrow() {
            return Cow::Borrowed(&[]);
        }
        let sources = self.graph.node(self.id).map(|n| n.sources()).unwrap_or_default();
        Cow::Owned(sources.iter().map(|&src| Self::at(self.graph, src, self.visited.clone())).collect())
    }
}

impl AOGraph {
    /// Render the graph from its root as an indented tree.
    pub fn tree(&self) -> String {
        let mut out = Vec::new();
        match ptree::write_tree_with(&AogTree::new(self), &mut out, &PrintConfig::default()) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(e) => format!("<tree rendering failed: {e}>"),
        }
    }
}
