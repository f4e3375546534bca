//! Doc-Block Location
//!
//! Walks upward from a declaration to the `/** ... */` block attached to it.
//! Blank lines, decorators and lint-suppression pragmas do not break the
//! attachment; any other line does, even a well-formed ordinary comment.

use crate::constants::DEFAULT_MAX_SIGNATURE_LINES;
use crate::source::matching_close;
use once_cell::sync::Lazy;
use regex::Regex;

static LINT_PRAGMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^//\s*(?:eslint-disable|eslint-enable|@ts-ignore|@ts-expect-error|@ts-nocheck|prettier-ignore|istanbul\s+ignore|c8\s+ignore|biome-ignore|tslint:)",
    )
    .expect("Invalid regex")
});

/// Inclusive 0-based line range of an attached doc block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocLocation {
    pub start_line: usize,
    pub end_line: usize,
}

/// Decorator line such as `@Injectable()`
pub fn is_decorator_line(line: &str) -> bool {
    line.trim_start().starts_with('@')
}

/// Single-line comment used only to silence a linter or type checker
pub fn is_lint_pragma(line: &str) -> bool {
    LINT_PRAGMA.is_match(line.trim_start())
}

/// Lines between a doc block and its declaration that keep the attachment
fn is_transparent(line: &str) -> bool {
    is_decorator_line(line) || is_lint_pragma(line)
}

/// First line of the transparent run ending at `index`, if `lines[index]`
/// belongs to one. A decorator whose argument list spans several lines
/// (`@Component({` ... `})`) is treated as one transparent unit.
fn transparent_start(lines: &[&str], index: usize) -> Option<usize> {
    if is_transparent(lines[index]) {
        return Some(index);
    }
    let lowest = index.saturating_sub(DEFAULT_MAX_SIGNATURE_LINES);
    (lowest..index)
        .rev()
        .take_while(|&i| !lines[i].trim_end().ends_with("*/"))
        .find(|&i| is_decorator_line(lines[i]))
        .filter(|&i| decorator_ends_on(lines, i, index))
}

/// Whether the call of the decorator on `start` closes at the end of `end`
fn decorator_ends_on(lines: &[&str], start: usize, end: usize) -> bool {
    let text = lines[start..=end].join("\n");
    let Some(open) = text.find('(') else {
        return false;
    };
    let first_line_len = lines[start].len();
    if open > first_line_len {
        return false;
    }
    let Some(close) = matching_close(&text, open) else {
        return false;
    };
    let last_line_start = text.len() - lines[end].len();
    close >= last_line_start && text[close + 1..].trim().trim_end_matches(';').is_empty()
}

/// Find the doc block attached to the declaration on `start_line`
pub fn locate_doc_block(lines: &[&str], start_line: usize) -> Option<DocLocation> {
    let mut index = start_line.min(lines.len());
    let closer_line = loop {
        index = index.checked_sub(1)?;
        if lines[index].trim().is_empty() {
            continue;
        }
        if let Some(start) = transparent_start(lines, index) {
            index = start;
            continue;
        }
        break index;
    };

    let closer = lines[closer_line].trim();
    if !closer.ends_with("*/") {
        return None;
    }

    let opener_line = find_opener(lines, closer_line)?;
    let opener = lines[opener_line].trim_start();
    let is_doc = opener.starts_with("/**") && !opener.starts_with("/**/");
    is_doc.then_some(DocLocation {
        start_line: opener_line,
        end_line: closer_line,
    })
}

/// Line starting with the `/*` that the `*/` on `closer_line` terminates.
/// A `/*` inside the body text (`image/*`) is not an opener.
fn find_opener(lines: &[&str], closer_line: usize) -> Option<usize> {
    if lines[closer_line].trim_start().starts_with("/*") {
        return Some(closer_line);
    }
    for index in (0..closer_line).rev() {
        let line = lines[index].trim();
        if line.starts_with("/*") {
            return Some(index);
        }
        if line.ends_with("*/") {
            // Reached the end of an earlier comment without an opener
            return None;
        }
    }
    None
}

/// First line a new doc block should be inserted at: above any decorators
/// and pragmas that sit directly on top of the declaration.
pub fn insertion_line(lines: &[&str], start_line: usize) -> usize {
    let mut line = start_line.min(lines.len());
    while line > 0 {
        match transparent_start(lines, line - 1) {
            Some(start) => line = start,
            None => break,
        }
    }
    line
}
