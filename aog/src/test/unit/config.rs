use test_case::test_case;

use crate::{AogConfig, Error, build};

#[test_case(4, 0, 2 ; "zero min_size")]
#[test_case(2, 3, 3 ; "dim below min_size")]
#[test_case(4, 3, 2 ; "max below min")]
fn test_invalid_configuration(dim: usize, min_size: usize, tnode_max_size: usize) {
    let config = AogConfig::new(dim, min_size, tnode_max_size, true);
    assert!(matches!(config.validate(), Err(Error::InvalidConfiguration { .. })));
    assert!(matches!(build(&config), Err(Error::InvalidConfiguration { .. })));
}

#[test]
fn test_builder_defaults() {
    let config = AogConfig::builder().dim(6).build();
    assert_eq!(config.min_size, 1);
    assert_eq!(config.tnode_max_size, 6);
    assert!(config.turn_off_unit_or_node);
    assert!(!config.parallel);
    assert!(config.validate().is_ok());
}

#[test]
fn test_admits_terminal() {
    let config = AogConfig::new(8, 2, 3, true);
    assert!(!config.admits_terminal(1));
    assert!(config.admits_terminal(2));
    assert!(config.admits_terminal(3));
    assert!(!config.admits_terminal(4));
}

#[test]
fn test_error_message_carries_bounds() {
    let err = AogConfig::new(4, 3, 2, true).validate().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("min_size=3"), "{msg}");
    assert!(msg.contains("tnode_max_size=2"), "{msg}");
}
