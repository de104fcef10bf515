//! Unit tests for error handling.
//!
//! This module contains tests for error classification, naming and rendering.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: '@' },
        Position(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnexpectedCharacter");
    assert_eq!(error.kind(), ErrorKind::Lexical);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "<else, keyword>".to_string(),
            index: 7,
        },
        Position(3, 42),
    );

    assert_eq!(error.get_position().0, 3);
    assert_eq!(error.get_position().1, 42);
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::InvalidDigit { character: '.' },
        Position(1, 6),
    );

    assert_eq!(
        error.to_string(),
        "Invalid digit '.' in numeric constant (at position 1:6)"
    );
    assert_eq!(error.message(), "Invalid digit '.' in numeric constant");
}

#[test]
fn test_parse_error_kind() {
    let error = Error::new(
        ErrorImpl::UnexpectedEndOfInput { index: 4 },
        Position(1, 12),
    );

    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.kind().to_string(), "ParseError");
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: "int".to_string(),
            received: "float".to_string(),
        },
        Position(1, 8),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert_eq!(error.kind(), ErrorKind::Type);
    assert!(error.to_string().contains("Type mismatch"));
}

#[test]
fn test_invalid_operands_message() {
    let error = Error::new(
        ErrorImpl::InvalidOperands {
            operation: "add".to_string(),
            left: "int".to_string(),
            right: "str".to_string(),
        },
        Position(2, 3),
    );

    assert_eq!(error.message(), "Cannot add types int and str");
}

#[test]
fn test_comparison_mismatch_message() {
    let error = Error::new(
        ErrorImpl::ComparisonMismatch {
            left: "int".to_string(),
            right: "str".to_string(),
        },
        Position(3, 7),
    );

    assert_eq!(error.get_error_name(), "ComparisonMismatch");
    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(error.message(), "Type mismatch: cannot compare int and str");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: '@' },
        Position(1, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::VariableNotFound {
            name: "x".to_string(),
        },
        Position(1, 1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("`x`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
