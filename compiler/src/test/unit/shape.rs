use test_case::test_case;

use crate::Shape;

#[test]
fn test_numel_and_with_dim() {
    let shape = Shape::from([2, 64, 8, 8]);
    assert_eq!(shape.rank(), 4);
    assert_eq!(shape.numel(), 2 * 64 * 8 * 8);
    assert_eq!(shape.with_dim(1, 16), Shape::from([2, 16, 8, 8]));
    assert_eq!(shape.with_dim(7, 16), shape);
    assert_eq!(shape.to_string(), "[2, 64, 8, 8]");
}

#[test_case([2, 16, 8, 8], 1, true ; "differs on axis only")]
#[test_case([2, 64, 4, 8], 1, false ; "differs elsewhere")]
#[test_case([2, 64, 8, 8], 3, true ; "identical")]
fn test_matches_except(other: [usize; 4], axis: usize, expected: bool) {
    assert_eq!(Shape::from([2, 64, 8, 8]).matches_except(&Shape::from(other), axis), expected);
}

#[test]
fn test_rank_mismatch_never_matches() {
    assert!(!Shape::from([2, 64]).matches_except(&Shape::from([2, 64, 1]), 1));
}
