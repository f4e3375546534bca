//! Tests for Doc Merging

use crate::test_utils::{callable, lines};
use docscan_validate::{DeclarationKind, DocBlock, DocMerger, DocSynthesizer, Parameter};

fn params(names: &[&str]) -> Vec<Parameter> {
    names.iter().map(|n| Parameter::new(*n)).collect()
}

#[test]
fn test_new_parameter_inserted_in_signature_order() {
    let original = lines(&[
        "/**",
        " * Formats a date for display.",
        " *",
        " * Uses the user's locale.",
        " *",
        " * @param date - The date to format.",
        " * @param locale - BCP 47 tag.",
        " * @returns The formatted string.",
        " */",
    ]);
    let block = DocBlock::parse(&original);
    let declaration = callable("formatDate", DeclarationKind::Function);

    let merged = DocMerger::merge(&block, &declaration, &params(&["date", "timeZone", "locale"]))
        .expect("timeZone is missing");

    let mut expected = original.clone();
    expected.insert(6, " * @param timeZone - The timeZone parameter.".to_string());
    assert_eq!(merged, expected);
}

#[test]
fn test_stale_entries_kept_after_matched() {
    let block = DocBlock::parse(&[
        "/**",
        " * Does it.",
        " *",
        " * @param old - Removed.",
        " * @returns Something.",
        " */",
    ]);
    let declaration = callable("run", DeclarationKind::Function);
    let merged = DocMerger::merge(&block, &declaration, &params(&["a"])).unwrap();
    assert_eq!(
        merged,
        vec![
            "/**",
            " * Does it.",
            " *",
            " * @param a - The a parameter.",
            " * @param old - Removed.",
            " * @returns Something.",
            " */",
        ]
    );
}

#[test]
fn test_other_tags_preserved_and_returns_appended() {
    let block = DocBlock::parse(&[
        "  /**",
        "   * Old.",
        "   *",
        "   * @deprecated Use newer.",
        "   * @example",
        "   *   old(1);",
        "   */",
    ]);
    let declaration = callable("old", DeclarationKind::Function);
    let merged = DocMerger::merge(&block, &declaration, &params(&["n"])).unwrap();
    assert_eq!(
        merged,
        vec![
            "  /**",
            "   * Old.",
            "   *",
            "   * @deprecated Use newer.",
            "   * @example",
            "   *   old(1);",
            "   * @param n - The n parameter.",
            "   * @returns The result of old.",
            "   */",
        ]
    );
}

#[test]
fn test_typed_jsdoc_params_match() {
    let block = DocBlock::parse(&[
        "/**",
        " * Sends.",
        " * @param {string} url - Target.",
        " * @param {RequestInit} [init] - Options.",
        " * @return {Promise<Response>} The response.",
        " */",
    ]);
    let declaration = callable("send", DeclarationKind::Function);
    assert_eq!(
        DocMerger::merge(&block, &declaration, &params(&["url", "init"])),
        None
    );
}

#[test]
fn test_placeholder_replaced_when_parameters_appear() {
    let declaration = callable("fetchData", DeclarationKind::Function);
    let placeholder = DocSynthesizer::synthesize(&declaration, &[]).render("");
    assert!(placeholder.iter().any(|l| l == " * @docscan-placeholder"));

    let block = DocBlock::parse(&placeholder);
    assert!(block.is_generic_placeholder);
    assert_eq!(DocMerger::merge(&block, &declaration, &[]), None);

    let merged = DocMerger::merge(&block, &declaration, &params(&["url"])).unwrap();
    assert_eq!(
        merged,
        vec![
            "/**",
            " * The fetch data.",
            " *",
            " * @param url - The url parameter.",
            " * @returns The result of fetchData.",
            " */",
        ]
    );
}

#[test]
fn test_class_block_without_tags_is_complete() {
    let block = DocBlock::parse(&["/** A repository. */"]);
    let declaration = callable("Repo", DeclarationKind::Class);
    assert_eq!(DocMerger::merge(&block, &declaration, &[]), None);
}
