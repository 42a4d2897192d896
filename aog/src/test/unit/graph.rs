use smallvec::smallvec;

use crate::{AOGraph, AogConfig, AogNode, Error, NodeId, Range, build};

fn t(lo: usize, hi: usize) -> AogNode {
    AogNode::Terminal { range: Range::new(lo, hi) }
}

fn and(lo: usize, hi: usize, children: &[u32]) -> AogNode {
    AogNode::And { range: Range::new(lo, hi), children: children.iter().map(|&c| NodeId(c)).collect() }
}

fn or(lo: usize, hi: usize, alternatives: &[u32]) -> AogNode {
    AogNode::Or { range: Range::new(lo, hi), alternatives: alternatives.iter().map(|&c| NodeId(c)).collect() }
}

fn config() -> AogConfig {
    AogConfig::new(2, 1, 2, true)
}

#[test]
fn test_hand_built_graph_is_valid() {
    let g = AOGraph::from_parts(vec![t(0, 1), t(1, 2), and(0, 2, &[0, 1]), t(0, 2), or(0, 2, &[3, 2])], NodeId(4), config());
    g.validate().unwrap();
    assert_eq!(g.toposort().unwrap(), vec![NodeId(3), NodeId(0), NodeId(1), NodeId(2), NodeId(4)]);
}

#[test]
fn test_tiling_gap_detected() {
    let g = AOGraph::from_parts(vec![t(0, 1), t(0, 1), and(0, 2, &[0, 1])], NodeId(2), config());
    assert_eq!(g.validate(), Err(Error::TilingViolation { node: NodeId(2), lo: 0, hi: 2, at: 1 }));
}

#[test]
fn test_tiling_short_detected() {
    let config = AogConfig::new(3, 1, 3, true);
    let g = AOGraph::from_parts(vec![t(0, 1), t(1, 2), and(0, 3, &[0, 1])], NodeId(2), config);
    assert_eq!(g.validate(), Err(Error::TilingViolation { node: NodeId(2), lo: 0, hi: 3, at: 2 }));
}

#[test]
fn test_or_of_or_rejected() {
    let g = AOGraph::from_parts(vec![t(0, 2), or(0, 2, &[0]), or(0, 2, &[1])], NodeId(2), config());
    assert_eq!(g.validate(), Err(Error::InvalidAlternative { node: NodeId(2), alternative: NodeId(1) }));
}

#[test]
fn test_or_alternative_range_mismatch_rejected() {
    let g = AOGraph::from_parts(vec![t(0, 1), t(0, 2), or(0, 2, &[1, 0])], NodeId(2), config());
    assert_eq!(g.validate(), Err(Error::InvalidAlternative { node: NodeId(2), alternative: NodeId(0) }));
}

#[test]
fn test_terminal_bounds_checked() {
    let config = AogConfig::new(2, 1, 1, true);
    let g = AOGraph::from_parts(vec![t(0, 2)], NodeId(0), config);
    assert!(matches!(g.validate(), Err(Error::TerminalOutOfBounds { len: 2, max_size: 1, .. })));
}

#[test]
fn test_root_range_checked() {
    let g = AOGraph::from_parts(vec![t(0, 1)], NodeId(0), config());
    assert_eq!(g.validate(), Err(Error::RootRange { lo: 0, hi: 1, dim: 2 }));
}

#[test]
fn test_dangling_child_detected() {
    let g = AOGraph::from_parts(vec![t(0, 1), and(0, 2, &[0, 7])], NodeId(1), config());
    assert_eq!(g.toposort(), Err(Error::DanglingChild { node: NodeId(1), child: NodeId(7) }));
    assert!(g.validate().is_err());
}

#[test]
fn test_cycle_detected() {
    let nodes = vec![
        AogNode::And { range: Range::new(0, 2), children: smallvec![NodeId(1), NodeId(1)] },
        AogNode::Or { range: Range::new(0, 2), alternatives: smallvec![NodeId(0)] },
    ];
    let g = AOGraph::from_parts(nodes, NodeId(0), config());
    assert!(matches!(g.toposort(), Err(Error::Cycle { .. })));
}

#[test]
fn test_empty_graph() {
    let g = AOGraph::from_parts(vec![], NodeId(0), config());
    assert_eq!(g.toposort(), Err(Error::EmptyGraph));
    assert!(g.is_empty());
}

#[test]
fn test_stats_count_shared_nodes() {
    let g = build(&AogConfig::new(4, 1, 2, true)).unwrap();
    let stats = g.stats();
    assert_eq!(stats.total(), 23);
    // And nodes are binary, Or fan-out sums to 3*2 + 2*2 + 3.
    assert_eq!(stats.edges, 10 * 2 + 13);
    assert!(stats.shared > 0);
}

#[test]
fn test_canonical_drops_unreachable_nodes() {
    // Arena order: unreachable T[0,2) first, root And last.
    let arena = vec![t(0, 2), t(1, 2), t(0, 1), and(0, 2, &[2, 1])];
    let g = AOGraph::canonical(arena, NodeId(3), config()).unwrap();
    assert_eq!(g.nodes(), &[t(0, 1), t(1, 2), and(0, 2, &[0, 1])]);
    assert_eq!(g.root(), NodeId(2));
}

#[test]
fn test_canonical_rejects_dangling_arena() {
    let err = AOGraph::canonical(vec![t(0, 1), and(0, 2, &[0, 5])], NodeId(1), config()).unwrap_err();
    assert_eq!(err, Error::DanglingChild { node: NodeId(1), child: NodeId(5) });
}

#[test]
fn test_canonical_rejects_empty_arena() {
    let err = AOGraph::canonical(vec![], NodeId(0), config()).unwrap_err();
    assert_eq!(err, Error::EmptyGraph);
}
