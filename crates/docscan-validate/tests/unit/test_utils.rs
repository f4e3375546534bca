//! Shared test utilities for docscan-validate tests

#![allow(dead_code)] // Test utilities may not all be used in every test file

use docscan_validate::{
    AnalysisConfig, Declaration, DeclarationKind, DeclarationScanner, Diagnostic, SourceText,
    analyze_source,
};
use std::path::Path;

/// Scan declarations with the default analysis settings
pub fn scan(text: &str) -> Vec<Declaration> {
    let config = AnalysisConfig::default();
    DeclarationScanner::new(&config).scan(&SourceText::new(text))
}

/// `(name, kind)` pairs of scanned declarations
pub fn scan_kinds(text: &str) -> Vec<(String, DeclarationKind)> {
    scan(text).into_iter().map(|d| (d.name, d.kind)).collect()
}

/// Check-mode diagnostics for a single in-memory file
pub fn check(text: &str) -> Vec<Diagnostic> {
    analyze_source(Path::new("test.ts"), text, &AnalysisConfig::default()).diagnostics
}

/// Symbols reported as missing docs
pub fn missing_symbols(text: &str) -> Vec<String> {
    check(text).into_iter().map(|d| d.symbol).collect()
}

/// A callable declaration for synthesizer and merger tests
pub fn callable(name: &str, kind: DeclarationKind) -> Declaration {
    Declaration {
        name: name.to_string(),
        kind,
        start_line: 0,
        raw_parameter_text: Some(String::new()),
    }
}

/// Owned lines from string literals
pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
