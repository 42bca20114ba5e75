//! Tests for core error types

use tsuml::core::{DiagramError, SymbolKind};

#[test]
fn test_unresolved_symbol() {
    let error = DiagramError::unresolved("Dog", SymbolKind::Heritage);
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Unresolved heritage clause symbol"));
    assert!(error_msg.contains("'Dog'"));
}

#[test]
fn test_unknown_engine() {
    let error = DiagramError::unknown_engine("dot", vec!["mermaid".to_string()]);
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Unknown engine: dot"));
    assert!(error_msg.contains("available: mermaid"));
}

#[test]
fn test_sink_failure() {
    let error = DiagramError::sink_failure("yuml", "upload failed");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Sink failure (yuml)"));
    assert!(error_msg.contains("upload failed"));
}

#[test]
fn test_invalid_input() {
    let error = DiagramError::invalid_input("expected value at line 1");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid input"));
    assert!(error_msg.contains("line 1"));
}

#[test]
fn test_io_error() {
    use std::io;
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    let error: DiagramError = io_err.into();
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("IO error"));
    assert!(error_msg.contains("denied"));
}

#[test]
fn test_converts_into_anyhow() {
    let error: anyhow::Error = DiagramError::unknown_engine("x", vec![]).into();
    assert!(error.downcast_ref::<DiagramError>().is_some());
}
