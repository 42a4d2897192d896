use crate::{AogConfig, build};

#[test]
fn test_tree_renders_root_first() {
    let g = build(&AogConfig::new(2, 1, 2, true)).unwrap();
    let tree = g.tree();
    let first = tree.lines().next().unwrap();
    assert!(first.contains("OR[0, 2)"), "{tree}");
    assert!(tree.contains("T[0, 2)"), "{tree}");
    assert!(tree.contains("AND[0, 2)"), "{tree}");
}

#[test]
fn test_tree_back_references_shared_nodes() {
    let g = build(&AogConfig::new(3, 1, 2, true)).unwrap();
    let tree = g.tree();
    assert!(tree.contains("(see above)"), "{tree}");
    // Each node is expanded at most once.
    for (id, node) in g.iter() {
        let expanded = format!("{id} {node}");
        assert_eq!(tree.matches(&expanded).count(), 1, "{expanded} in\n{tree}");
    }
}
