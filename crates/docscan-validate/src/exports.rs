//! Export Resolution
//!
//! Decides which scanned declarations are part of a file's public surface:
//! - direct exports (`export function foo`, `export default class Bar`)
//! - named export blocks (`export { a, b as c }`), possibly multi-line
//!
//! Blocks followed by `from '...'` re-export another module and are skipped.
//! Names in a block that match no local declaration are treated as imported
//! re-exports and ignored.

use crate::scanner::Declaration;
use crate::source::SourceText;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

static EXPORT_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^export\s").expect("Invalid regex"));
static NAMED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+(?:type\s+)?\{([^}]*)\}").expect("Invalid regex")
});
static FROM_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*from\b").expect("Invalid regex"));
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\n]*").expect("Invalid regex"));
static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid regex"));
static EXPORT_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:type\s+)?([A-Za-z_$][\w$]*)(?:\s+as\s+([A-Za-z_$][\w$]*))?$")
        .expect("Invalid regex")
});

/// How a declaration was exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportForm {
    Direct,
    NamedBlock,
}

/// One exported name bound to a local declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExportRecord {
    pub exported_name: String,
    /// Name of the declaration inside the file (`a` in `a as b`)
    pub local_name: String,
    pub form: ExportForm,
}

/// Heuristic: the declaration line itself starts with `export`
pub fn looks_like_exported_declaration(line: &str) -> bool {
    EXPORT_KEYWORD.is_match(line.trim_start())
}

/// Stateless resolver over one file
pub struct ExportResolver;

impl ExportResolver {
    /// Resolve every export record of the file. Duplicate exports collapse.
    pub fn resolve(source: &SourceText<'_>, declarations: &[Declaration]) -> Vec<ExportRecord> {
        let local_names: HashSet<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        let direct = declarations
            .iter()
            .filter(|d| looks_like_exported_declaration(source.line(d.start_line)))
            .map(|d| ExportRecord {
                exported_name: d.name.clone(),
                local_name: d.name.clone(),
                form: ExportForm::Direct,
            });
        let named = Self::named_block_records(source)
            .into_iter()
            .filter(|r| local_names.contains(r.local_name.as_str()));

        for record in direct.chain(named) {
            if seen.insert((record.exported_name.clone(), record.local_name.clone())) {
                records.push(record);
            }
        }
        records
    }

    /// Records from `export { ... }` blocks, before matching against declarations
    fn named_block_records(source: &SourceText<'_>) -> Vec<ExportRecord> {
        let text = source.text();
        let mut records = Vec::new();
        for caps in NAMED_BLOCK.captures_iter(text) {
            let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if !source.is_top_level(source.line_of_offset(whole.start())) {
                continue;
            }
            if FROM_SUFFIX.is_match(&text[whole.end()..]) {
                continue;
            }

            let body = BLOCK_COMMENT.replace_all(body.as_str(), "");
            let body = LINE_COMMENT.replace_all(&body, "");
            for item in body.split(',') {
                let Some(item_caps) = EXPORT_ITEM.captures(item.trim()) else {
                    continue;
                };
                let local = item_caps.get(1).map_or("", |m| m.as_str());
                let exported = item_caps.get(2).map_or(local, |m| m.as_str());
                records.push(ExportRecord {
                    exported_name: exported.to_string(),
                    local_name: local.to_string(),
                    form: ExportForm::NamedBlock,
                });
            }
        }
        records
    }

    /// Exported declarations in file order, each local name once
    pub fn exported_declarations<'d>(
        declarations: &'d [Declaration],
        records: &[ExportRecord],
    ) -> Vec<&'d Declaration> {
        let exported: HashSet<&str> = records.iter().map(|r| r.local_name.as_str()).collect();
        declarations
            .iter()
            .filter(|d| exported.contains(d.name.as_str()))
            .collect()
    }
}
