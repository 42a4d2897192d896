//! Structural interning of AOG nodes.
//!
//! Structurally identical nodes share one arena slot. The key of a node is its
//! kind plus either its range (Terminal), its ordered child ids (And), or its
//! alternative-id set (Or). Since children are interned before their parents,
//! equal keys imply equal sub-graphs.
//!
//! # Thread Safety
//!
//! Lookups go through a lock-free `papaya` map. Insertion re-checks the map
//! while holding the arena lock, so when two threads race to intern the same
//! structure exactly one arena slot is created and both get its id.

use papaya::HashMap;
use parking_lot::Mutex;

use crate::node::{Alternatives, Children};
use crate::{AogNode, NodeId, Range};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum NodeKey {
    Terminal(Range),
    And(Children),
    /// Sorted; alternative order does not affect identity.
    Or(Alternatives),
}

impl NodeKey {
    pub(crate) fn of(node: &AogNode) -> Self {
        match node {
            AogNode::Terminal { range } => Self::Terminal(*range),
            AogNode::And { children, .. } => Self::And(children.clone()),
            AogNode::Or { alternatives, .. } => {
                let mut set = alternatives.clone();
                set.sort_unstable();
                Self::Or(set)
            }
        }
    }
}

pub(crate) struct Interner {
    index: HashMap<NodeKey, NodeId>,
    arena: Mutex<Vec<AogNode>>,
}

impl Interner {
    pub(crate) fn new() -> Self {
        Self { index: HashMap::new(), arena: Mutex::new(Vec::new()) }
    }

    /// Return the id of `node`, creating it on first sight.
    pub(crate) fn intern(&self, node: AogNode) -> NodeId {
        let key = NodeKey::of(&node);
        let index = self.index.pin();

        if let Some(&id) = index.get(&key) {
            return id;
        }

        let mut arena = self.arena.lock();
        if let Some(&id) = index.get(&key) {
            return id;
        }

        let id = NodeId::from(arena.len());
        tracing::trace!(%id, %node, "interned node");
        arena.push(node);
        index.insert(key, id);
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.lock().len()
    }

    pub(crate) fn into_nodes(self) -> Vec<AogNode> {
        self.arena.into_inner()
    }
}
