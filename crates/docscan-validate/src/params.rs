//! Parameter Extraction
//!
//! Turns raw parameter text into the ordered list of names it binds.
//! Object and array patterns expand to their bindings, renamed properties
//! keep the local name, and defaults, type annotations, rest elements and
//! `this` parameters are dropped. This is deliberately not a grammar: a
//! nested pattern under a property key is flattened to the key.

use crate::source::{find_top_level, find_top_level_assignment, matching_close, split_top_level};
use serde::Serialize;

/// A bound parameter name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    pub name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

const MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

/// Extract bound names from the text between a signature's parentheses
pub fn extract_parameters(raw: &str) -> Vec<Parameter> {
    let mut params = Vec::new();
    for argument in split_top_level(raw, b',') {
        let argument = strip_modifiers(strip_default(argument.trim()));
        if argument.is_empty() || argument.starts_with("...") {
            continue;
        }
        if argument.starts_with('{') {
            expand_object_pattern(argument, &mut params);
        } else if argument.starts_with('[') {
            expand_array_pattern(argument, &mut params);
        } else {
            push_binding(strip_annotation(argument), &mut params);
        }
    }
    params
}

/// Names only, for callers that do not need the wrapper type
pub fn parameter_names(raw: &str) -> Vec<String> {
    extract_parameters(raw).into_iter().map(|p| p.name).collect()
}

fn strip_default(text: &str) -> &str {
    match find_top_level_assignment(text) {
        Some(eq) => text[..eq].trim(),
        None => text,
    }
}

fn strip_annotation(text: &str) -> &str {
    match find_top_level(text, b':') {
        Some(colon) => text[..colon].trim(),
        None => text,
    }
}

fn strip_modifiers(mut text: &str) -> &str {
    loop {
        let stripped = MODIFIERS.iter().find_map(|modifier| {
            text.strip_prefix(modifier)
                .filter(|rest| rest.starts_with(char::is_whitespace))
        });
        match stripped {
            Some(rest) => text = rest.trim_start(),
            None => return text,
        }
    }
}

/// Interior of the pattern opened at byte 0; everything after the opener when unbalanced
fn pattern_interior(pattern: &str) -> &str {
    match matching_close(pattern, 0) {
        Some(close) => &pattern[1..close],
        None => &pattern[1..],
    }
}

fn expand_object_pattern(pattern: &str, params: &mut Vec<Parameter>) {
    for property in split_top_level(pattern_interior(pattern), b',') {
        let property = strip_default(property.trim());
        if property.is_empty() || property.starts_with("...") {
            continue;
        }
        let binding = match find_top_level(property, b':') {
            Some(colon) => {
                let target = property[colon + 1..].trim();
                if target.starts_with('{') || target.starts_with('[') {
                    property[..colon].trim()
                } else {
                    target
                }
            }
            None => property,
        };
        push_binding(binding, params);
    }
}

fn expand_array_pattern(pattern: &str, params: &mut Vec<Parameter>) {
    for element in split_top_level(pattern_interior(pattern), b',') {
        let element = strip_default(element.trim());
        if element.is_empty()
            || element.starts_with("...")
            || element.starts_with('{')
            || element.starts_with('[')
        {
            continue;
        }
        push_binding(element, params);
    }
}

fn push_binding(name: &str, params: &mut Vec<Parameter>) {
    let name = name.trim().trim_end_matches('?');
    if name != "this" && is_identifier(name) {
        params.push(Parameter::new(name));
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
