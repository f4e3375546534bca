//! Diagnostics and Change Records
//!
//! The two kinds of per-symbol output: a missing-doc diagnostic in check
//! mode and an applied change in fix mode. Their `Display` forms are the
//! stdout lines of the human-readable report.

use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;

/// An exported symbol with no attached doc block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    /// 1-based line of the declaration
    pub line: usize,
    pub symbol: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: missing doc for exported symbol '{}'",
            self.file.display(),
            self.line,
            self.symbol
        )
    }
}

/// Whether a doc block was inserted or rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Updated,
}

impl Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "Added"),
            Self::Updated => write!(f, "Updated"),
        }
    }
}

/// A doc change applied in fix mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocChange {
    pub file: PathBuf,
    pub symbol: String,
    pub kind: ChangeKind,
}

impl Display for DocChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} doc for {} in {}",
            self.kind,
            self.symbol,
            self.file.display()
        )
    }
}
