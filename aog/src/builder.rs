//! AOG construction.
//!
//! Memoized recursion over ranges. For a range `r`:
//!
//! 1. A Terminal candidate exists when `min_size <= len(r) <= tnode_max_size`.
//! 2. Every interior cut `k` yields an And candidate over the resolved nodes of
//!    `[lo, k)` and `[k, hi)`, provided both sides are resolvable.
//! 3. Several candidates are wrapped in an Or node; a single candidate is used
//!    directly, except that unit ranges get a single-alternative Or unless
//!    `turn_off_unit_or_node` is set.
//!
//! The memo table is keyed by range value, which is what turns the recursion
//! tree into a DAG with shared sub-structures. It lives in a [`BuildContext`]
//! scoped to one `build` call.

use papaya::HashMap;
use rayon::prelude::*;
use smallvec::smallvec;
use snafu::OptionExt;
use tracing::debug;

use crate::error::*;
use crate::intern::Interner;
use crate::node::Alternatives;
use crate::{AOGraph, AogConfig, AogNode, NodeId, Range};

/// Ranges this short are not worth a trip to the thread pool.
const PARALLEL_MIN_LEN: usize = 4;

/// Mutable state of a single `build` call.
pub struct BuildContext<'a> {
    config: &'a AogConfig,
    memo: HashMap<Range, Option<NodeId>>,
    interner: Interner,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a AogConfig) -> Self {
        Self { config, memo: HashMap::new(), interner: Interner::new() }
    }

    /// Resolve the node representing `range`, or `None` when no alternative
    /// satisfies the size bounds.
    pub fn resolve(&self, range: Range) -> Option<NodeId> {
        if let Some(&hit) = self.memo.pin().get(&range) {
            return hit;
        }

        // Concurrent resolvers of the same range intern identical structures,
        // so whichever insert lands last stores the same id.
        let resolved = self.resolve_uncached(range);
        self.memo.pin().insert(range, resolved);
        resolved
    }

    fn resolve_uncached(&self, range: Range) -> Option<NodeId> {
        let mut alternatives = Alternatives::new();

        if self.config.admits_terminal(range.len()) {
            alternatives.push(self.interner.intern(AogNode::Terminal { range }));
        }

        if self.config.parallel && range.len() >= PARALLEL_MIN_LEN {
            let ands: Vec<NodeId> = range.cuts().into_par_iter().filter_map(|k| self.and_candidate(range, k)).collect();
            alternatives.extend(ands);
        } else {
            alternatives.extend(range.cuts().filter_map(|k| self.and_candidate(range, k)));
        }

        let keep_unit_or = range.is_unit() && !self.config.turn_off_unit_or_node;
        match alternatives.len() {
            0 => None,
            1 if !keep_unit_or => Some(alternatives[0]),
            _ => Some(self.interner.intern(AogNode::Or { range, alternatives })),
        }
    }

    fn and_candidate(&self, range: Range, k: usize) -> Option<NodeId> {
        let (left, right) = range.split_at(k)?;
        let left = self.resolve(left)?;
        let right = self.resolve(right)?;
        Some(self.interner.intern(AogNode::And { range, children: smallvec![left, right] }))
    }

    pub fn memoized_ranges(&self) -> usize {
        self.memo.len()
    }

    pub fn interned_nodes(&self) -> usize {
        self.interner.len()
    }

    fn into_nodes(self) -> Vec<AogNode> {
        self.interner.into_nodes()
    }
}

/// Build the AND-OR graph of one dimension.
///
/// Fails with [`Error::InvalidConfiguration`] for inconsistent bounds and with
/// [`Error::Undecomposable`] when `[0, dim)` has no admissible decomposition
/// (for example `dim = 3, min_size = tnode_max_size = 2`).
#[tracing::instrument(skip_all, fields(dim = config.dim, min_size = config.min_size, tnode_max_size = config.tnode_max_size))]
pub fn build(config: &AogConfig) -> Result<AOGraph> {
    config.validate()?;

    let ctx = BuildContext::new(config);
    let root = ctx.resolve(Range::new(0, config.dim)).context(UndecomposableSnafu { lo: 0usize, hi: config.dim })?;

    let memoized = ctx.memoized_ranges();
    let interned = ctx.interned_nodes();
    let graph = AOGraph::canonical(ctx.into_nodes(), root, *config)?;

    let stats = graph.stats();
    debug!(
        memoized,
        interned,
        nodes = graph.len(),
        terminals = stats.terminals,
        ands = stats.ands,
        ors = stats.ors,
        "aog built"
    );

    Ok(graph)
}

/// Build one graph per dimension. Each build gets its own memo table.
pub fn build_all(configs: &[AogConfig]) -> Result<Vec<AOGraph>> {
    configs.iter().map(build).collect()
}
