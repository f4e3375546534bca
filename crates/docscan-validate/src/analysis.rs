//! Per-File Analysis
//!
//! Pure functions from file text to results: diagnostics for check mode and
//! rewritten content for fix mode. Nothing here touches the filesystem.

use crate::config::AnalysisConfig;
use crate::diagnostic::{ChangeKind, Diagnostic, DocChange};
use crate::docblock::DocBlock;
use crate::exports::{ExportRecord, ExportResolver};
use crate::locator::{insertion_line, locate_doc_block};
use crate::merge::DocMerger;
use crate::params::{Parameter, extract_parameters};
use crate::scanner::{Declaration, DeclarationScanner};
use crate::source::SourceText;
use crate::synth::DocSynthesizer;
use std::path::{Path, PathBuf};

/// Check-mode result for one file
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
    pub exports: Vec<ExportRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Fix-mode result for one file
#[derive(Debug, Clone, Default)]
pub struct FixOutcome {
    /// New file content, only when at least one block changed
    pub content: Option<String>,
    pub changes: Vec<DocChange>,
}

/// Replace `remove` lines starting at `start` with `lines`
struct Edit {
    start: usize,
    remove: usize,
    lines: Vec<String>,
}

/// Scan, resolve exports and report exported symbols without a doc block
pub fn analyze_source(path: &Path, text: &str, config: &AnalysisConfig) -> FileAnalysis {
    let source = SourceText::new(text);
    let declarations = DeclarationScanner::new(config).scan(&source);
    let exports = ExportResolver::resolve(&source, &declarations);

    let diagnostics = ExportResolver::exported_declarations(&declarations, &exports)
        .into_iter()
        .filter(|d| locate_doc_block(source.lines(), d.start_line).is_none())
        .map(|d| Diagnostic {
            file: path.to_path_buf(),
            line: d.start_line + 1,
            symbol: d.name.clone(),
        })
        .collect();

    FileAnalysis {
        path: path.to_path_buf(),
        declarations,
        exports,
        diagnostics,
    }
}

/// Insert missing doc blocks and merge incomplete ones
pub fn fix_source(path: &Path, text: &str, config: &AnalysisConfig) -> FixOutcome {
    let source = SourceText::new(text);
    let lines = source.lines();
    let declarations = DeclarationScanner::new(config).scan(&source);
    let exports = ExportResolver::resolve(&source, &declarations);

    let mut edits = Vec::new();
    let mut changes = Vec::new();
    for declaration in ExportResolver::exported_declarations(&declarations, &exports) {
        let params = parameters_of(declaration);
        let change = |kind| DocChange {
            file: path.to_path_buf(),
            symbol: declaration.name.clone(),
            kind,
        };

        match locate_doc_block(lines, declaration.start_line) {
            Some(location) => {
                let block = DocBlock::parse(&lines[location.start_line..=location.end_line]);
                if let Some(merged) = DocMerger::merge(&block, declaration, &params) {
                    edits.push(Edit {
                        start: location.start_line,
                        remove: location.end_line - location.start_line + 1,
                        lines: merged,
                    });
                    changes.push(change(ChangeKind::Updated));
                }
            }
            None => {
                let indent = leading_whitespace(source.line(declaration.start_line));
                let rendered = DocSynthesizer::synthesize(declaration, &params).render(indent);
                edits.push(Edit {
                    start: insertion_line(lines, declaration.start_line),
                    remove: 0,
                    lines: rendered,
                });
                changes.push(change(ChangeKind::Added));
            }
        }
    }

    if edits.is_empty() {
        return FixOutcome {
            content: None,
            changes,
        };
    }
    FixOutcome {
        content: Some(apply_edits(text, lines, edits)),
        changes,
    }
}

fn parameters_of(declaration: &Declaration) -> Vec<Parameter> {
    declaration
        .raw_parameter_text
        .as_deref()
        .map(extract_parameters)
        .unwrap_or_default()
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Apply edits bottom-up and rejoin with the file's line ending
fn apply_edits(text: &str, lines: &[&str], mut edits: Vec<Edit>) -> String {
    let mut output: Vec<String> = lines.iter().map(|l| (*l).to_string()).collect();
    edits.sort_by(|a, b| b.start.cmp(&a.start));
    for edit in edits {
        output.splice(edit.start..edit.start + edit.remove, edit.lines);
    }
    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    output.join(newline)
}
