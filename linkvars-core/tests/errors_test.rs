//! Tests for the error enums and their codes.

use linkvars_core::errors::error_code;
use linkvars_core::errors::{ConfigError, GraphError, LinkError, LinkvarsErrorCode};

#[test]
fn test_every_enum_has_its_code() {
    assert_eq!(LinkError::EmptyIndices.error_code(), error_code::LINK_ERROR);
    assert_eq!(
        GraphError::UnknownVariable { name: "a".into() }.error_code(),
        error_code::GRAPH_ERROR
    );
    assert_eq!(
        ConfigError::FileNotFound { path: "x".into() }.error_code(),
        error_code::CONFIG_ERROR
    );
}

#[test]
fn test_coded_string_prefixes_message() {
    let err = GraphError::SelectOutOfRange { index: 4, len: 2 };
    assert_eq!(
        err.coded_string(),
        "[GRAPH_ERROR] Index 4 out of range for 2 linked variables"
    );

    let err = LinkError::MultipleWildcardEntries { count: 3 };
    assert_eq!(
        err.coded_string(),
        "[LINK_ERROR] Link map has 3 entries touching the wildcard, at most one is allowed"
    );

    let err = LinkError::SharedTarget { target: "1.0".into() };
    assert_eq!(
        err.coded_string(),
        "[LINK_ERROR] Target coordinates 1.0 appear in more than one entry"
    );
}

#[test]
fn test_messages_carry_context() {
    let err = GraphError::Frozen { name: "x".into() };
    assert!(err.to_string().contains('x'));

    let err = GraphError::ReturnValueTarget {
        from: "a".into(),
        to: "rv".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("rv") && msg.contains('a'));

    let err = ConfigError::ValidationFailed {
        field: "cache.max_entries".into(),
        message: "must be greater than 0".into(),
    };
    assert_eq!(
        err.coded_string(),
        "[CONFIG_ERROR] Config validation failed for cache.max_entries: must be greater than 0"
    );
}

#[test]
fn test_errors_are_std_errors() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<LinkError>();
    assert_error::<GraphError>();
    assert_error::<ConfigError>();
}
