//! Declaration Scanner
//!
//! Finds top-level declaration sites line by line:
//! - `function` declarations (async, generator, default, declare)
//! - `const`/`let`/`var` bound to an arrow, a function expression or a
//!   wrapper call such as `memo(...)` / `forwardRef(...)`
//! - classes, interfaces, type aliases, enums
//!
//! For callables the raw parameter text is captured by balancing brackets
//! from the first unmatched `(`, across lines if needed.

use crate::config::AnalysisConfig;
use crate::source::{
    CodeBytes, SourceText, find_top_level, find_top_level_assignment, is_assignment_at,
    matching_close,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:async\s+)?function\b\s*\*?\s*([A-Za-z_$][\w$]*)",
    )
    .expect("Invalid regex")
});
static VARIABLE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:export\s+)?(?:declare\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)")
        .expect("Invalid regex")
});
static CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)",
    )
    .expect("Invalid regex")
});
static INTERFACE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:export\s+)?(?:declare\s+)?interface\s+([A-Za-z_$][\w$]*)")
        .expect("Invalid regex")
});
static TYPE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:export\s+)?(?:declare\s+)?type\s+([A-Za-z_$][\w$]*)\s*(?:<|=)")
        .expect("Invalid regex")
});
static ENUM_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:export\s+)?(?:declare\s+)?(?:const\s+)?enum\s+([A-Za-z_$][\w$]*)")
        .expect("Invalid regex")
});

/// Nesting limit for `memo(forwardRef(...))` style wrapper chains
const MAX_WRAPPER_NESTING: u8 = 4;

/// What a declaration declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Function,
    Class,
    Interface,
    TypeAlias,
    Enum,
    /// Non-callable `const`/`let`/`var` (only with `include_variables`)
    Variable,
    /// Callable whose name starts with an uppercase letter
    Component,
    /// Callable named `useXxx`
    Hook,
}

impl DeclarationKind {
    pub fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Component | Self::Hook)
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::TypeAlias => write!(f, "type"),
            Self::Enum => write!(f, "enum"),
            Self::Variable => write!(f, "const"),
            Self::Component => write!(f, "component"),
            Self::Hook => write!(f, "hook"),
        }
    }
}

/// A declaration site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// 0-based line of the declaration keyword
    pub start_line: usize,
    /// Text between the parameter list parentheses, callables only
    pub raw_parameter_text: Option<String>,
}

/// Heuristic hook detection: `use` followed by an uppercase letter, a digit, or nothing
pub fn looks_like_hook(name: &str) -> bool {
    name.strip_prefix("use").is_some_and(|rest| {
        rest.chars()
            .next()
            .is_none_or(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    })
}

/// Heuristic component detection: leading uppercase letter
pub fn looks_like_component(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

fn refine_callable(name: &str) -> DeclarationKind {
    if looks_like_hook(name) {
        DeclarationKind::Hook
    } else if looks_like_component(name) {
        DeclarationKind::Component
    } else {
        DeclarationKind::Function
    }
}

/// Right-hand side of a variable declaration
enum Initializer {
    Callable { params: Option<String> },
    Value,
}

/// Line-oriented declaration scanner
pub struct DeclarationScanner<'c> {
    config: &'c AnalysisConfig,
}

impl<'c> DeclarationScanner<'c> {
    pub fn new(config: &'c AnalysisConfig) -> Self {
        Self { config }
    }

    /// Scan every top-level line. The first declaration of a name wins.
    pub fn scan(&self, source: &SourceText<'_>) -> Vec<Declaration> {
        let mut seen = HashSet::new();
        let mut declarations = Vec::new();
        for index in 0..source.line_count() {
            if !source.is_top_level(index) {
                continue;
            }
            if let Some(declaration) = self.scan_line(source, index) {
                if seen.insert(declaration.name.clone()) {
                    declarations.push(declaration);
                }
            }
        }
        declarations
    }

    fn scan_line(&self, source: &SourceText<'_>, index: usize) -> Option<Declaration> {
        let line = source.line(index);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('*') {
            return None;
        }
        let line_offset = source.line_start(index) + (line.len() - trimmed.len());
        let limit = source
            .line_start(index + self.config.max_signature_lines + 1)
            .min(source.text().len());
        let window = &source.text()[..limit];

        let declaration = |name: &str, kind, raw_parameter_text| Declaration {
            name: name.to_string(),
            kind,
            start_line: index,
            raw_parameter_text,
        };

        if let Some(caps) = FUNCTION_DECL.captures(trimmed) {
            let name = caps.get(1)?;
            let params = function_parameters(window, line_offset + name.end());
            return Some(declaration(
                name.as_str(),
                refine_callable(name.as_str()),
                params,
            ));
        }

        if let Some(caps) = VARIABLE_DECL.captures(trimmed) {
            let name = caps.get(1)?;
            if name.as_str() != "enum" {
                return match self.variable_initializer(window, line_offset + name.end()) {
                    Some(Initializer::Callable { params }) => Some(declaration(
                        name.as_str(),
                        refine_callable(name.as_str()),
                        Some(params.unwrap_or_default()),
                    )),
                    Some(Initializer::Value) | None if self.config.include_variables => {
                        Some(declaration(name.as_str(), DeclarationKind::Variable, None))
                    }
                    _ => None,
                };
            }
        }

        let typed = [
            (&*CLASS_DECL, DeclarationKind::Class),
            (&*INTERFACE_DECL, DeclarationKind::Interface),
            (&*TYPE_DECL, DeclarationKind::TypeAlias),
            (&*ENUM_DECL, DeclarationKind::Enum),
        ];
        for (pattern, kind) in typed {
            if let Some(caps) = pattern.captures(trimmed) {
                let name = caps.get(1)?.as_str();
                if name == "extends" || name == "implements" {
                    return None;
                }
                return Some(declaration(name, kind, None));
            }
        }
        None
    }

    /// Classify what follows `const name[: Type] =`, if there is an `=` on the line
    fn variable_initializer(&self, window: &str, name_end: usize) -> Option<Initializer> {
        let rest = &window[name_end..];
        let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
        let statement = match find_top_level(line, b';') {
            Some(end) => &line[..end],
            None => line,
        };
        let eq = find_top_level_assignment(statement)?;
        Some(self.classify_initializer(window, name_end + eq + 1, MAX_WRAPPER_NESTING))
    }

    fn classify_initializer(&self, window: &str, pos: usize, budget: u8) -> Initializer {
        let mut pos = skip_ws(window, pos);
        if let Some(after) = keyword_at(window, pos, "async") {
            pos = skip_ws(window, after);
        }

        if let Some(after) = keyword_at(window, pos, "function") {
            let mut p = skip_ws(window, after);
            if window.as_bytes().get(p) == Some(&b'*') {
                p = skip_ws(window, p + 1);
            }
            p = skip_path(window, p);
            return Initializer::Callable {
                params: function_parameters(window, p),
            };
        }

        match window.as_bytes().get(pos) {
            Some(b'<' | b'(') => match arrow_parameters(window, pos) {
                Some(params) => Initializer::Callable {
                    params: Some(params),
                },
                None => Initializer::Value,
            },
            Some(&b) if is_ident_start(b) => {
                let end = skip_path(window, pos);
                let callee = &window[pos..end];
                let after = skip_ws(window, end);
                if window[after..].starts_with("=>") && !callee.contains('.') {
                    return Initializer::Callable {
                        params: Some(callee.to_string()),
                    };
                }
                if self.config.is_wrapper(callee) {
                    return self.classify_wrapper_call(window, after, budget);
                }
                Initializer::Value
            }
            _ => Initializer::Value,
        }
    }

    /// `memo<Props>(inner)` with `pos` just past the callee
    fn classify_wrapper_call(&self, window: &str, pos: usize, budget: u8) -> Initializer {
        let mut open = pos;
        if window.as_bytes().get(open) == Some(&b'<') {
            match matching_close(window, open) {
                Some(close) => open = skip_ws(window, close + 1),
                None => return Initializer::Value,
            }
        }
        if window.as_bytes().get(open) != Some(&b'(') {
            return Initializer::Value;
        }
        // `memo(Inner)` still wraps a component, we just cannot see its parameters
        let params = if budget == 0 {
            None
        } else {
            match self.classify_initializer(window, open + 1, budget - 1) {
                Initializer::Callable { params } => params,
                Initializer::Value => None,
            }
        };
        Initializer::Callable { params }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn skip_ws(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

/// Skip `ident(.ident)*`
fn skip_path(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while bytes.get(pos).is_some_and(|&b| is_ident_byte(b) || b == b'.') {
        pos += 1;
    }
    pos
}

/// Position after `keyword` if it starts at `pos` as a whole word
fn keyword_at(text: &str, pos: usize, keyword: &str) -> Option<usize> {
    let rest = text.get(pos..)?;
    let after = pos + keyword.len();
    (rest.starts_with(keyword) && !text.as_bytes().get(after).is_some_and(|&b| is_ident_byte(b)))
        .then_some(after)
}

/// Parameters of `name<...>(...)` with `pos` just past the name
fn function_parameters(window: &str, pos: usize) -> Option<String> {
    let mut open = skip_ws(window, pos);
    if window.as_bytes().get(open) == Some(&b'<') {
        open = skip_ws(window, matching_close(window, open)? + 1);
    }
    if window.as_bytes().get(open) != Some(&b'(') {
        return None;
    }
    Some(parameter_text(window, open))
}

/// Parameters of `<T>(...) =>` or `(...): R =>`; `None` when not an arrow
fn arrow_parameters(window: &str, pos: usize) -> Option<String> {
    let mut open = pos;
    if window.as_bytes().get(open) == Some(&b'<') {
        open = skip_ws(window, matching_close(window, open)? + 1);
    }
    if window.as_bytes().get(open) != Some(&b'(') {
        return None;
    }
    let close = matching_close(window, open)?;
    let params = window[open + 1..close].to_string();
    let after = skip_ws(window, close + 1);
    if window[after..].starts_with("=>") {
        return Some(params);
    }
    if window.as_bytes().get(after) != Some(&b':') {
        return None;
    }
    // Return type annotation: the first top-level `=>` after it belongs to the arrow
    for (i, byte, depth) in CodeBytes::new(window, after + 1) {
        if !depth.is_top_level() {
            continue;
        }
        match byte {
            b'=' if window.as_bytes().get(i + 1) == Some(&b'>') => return Some(params),
            b';' | b'{' => return None,
            b'=' if is_assignment_at(window, i) => return None,
            _ => {}
        }
    }
    None
}

/// Text inside the group opened at `open`. When the group never closes, keep
/// only the arguments before the last top-level comma.
fn parameter_text(window: &str, open: usize) -> String {
    if let Some(close) = matching_close(window, open) {
        return window[open + 1..close].to_string();
    }
    let mut last_comma = None;
    for (i, byte, depth) in CodeBytes::new(window, open) {
        if byte == b','
            && depth.paren == 1
            && depth.bracket == 0
            && depth.brace == 0
            && depth.angle == 0
        {
            last_comma = Some(i);
        }
    }
    last_comma.map_or_else(String::new, |comma| window[open + 1..comma].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Declaration> {
        let config = AnalysisConfig::default();
        DeclarationScanner::new(&config).scan(&SourceText::new(text))
    }

    #[test]
    fn test_hook_and_component_heuristics() {
        assert!(looks_like_hook("useState"));
        assert!(looks_like_hook("use"));
        assert!(!looks_like_hook("user"));
        assert!(looks_like_component("Button"));
        assert!(!looks_like_component("button"));
    }

    #[test]
    fn test_return_type_arrow() {
        let found = scan("export const f = (a: string): Promise<void> => run(a);\n");
        assert_eq!(found[0].kind, DeclarationKind::Function);
        assert_eq!(found[0].raw_parameter_text.as_deref(), Some("a: string"));
    }

    #[test]
    fn test_parenthesized_value_is_not_callable() {
        assert!(scan("export const total = (a + b) * 2;\n").is_empty());
    }

    #[test]
    fn test_unbalanced_keeps_safe_prefix() {
        let found = scan("export function broken(a: string, b: number, c: (x\n");
        assert_eq!(
            found[0].raw_parameter_text.as_deref(),
            Some("a: string, b: number")
        );
    }
}
