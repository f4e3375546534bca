//! Documentation Coverage for Exported TypeScript Declarations
//!
//! This crate audits the public surface of TypeScript/TSX source trees:
//! - Declaration scanning (functions, arrow consts, wrapped components, classes,
//!   interfaces, type aliases, enums)
//! - Export resolution (direct exports and `export { a, b as c }` blocks)
//! - Doc-block location (tolerant of decorators, blank lines and lint pragmas)
//! - Doc synthesis and non-destructive merging in fix mode
//!
//! All scanning is heuristic: a line-and-bracket-depth state machine, not a
//! grammar. Names like `looks_like_*` mark the places where that matters.
//!
//! # Example
//!
//! ```ignore
//! use docscan_validate::{Auditor, AuditMode, ScanConfig};
//!
//! let config = ScanConfig::default().with_root("web/src");
//! let report = Auditor::new(config)?.run(AuditMode::Check)?;
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```

pub mod constants;

// === Configuration ===
pub mod config;

// === Text model ===
pub mod source;

// === Per-file pipeline ===
pub mod docblock;
pub mod exports;
pub mod locator;
pub mod merge;
pub mod params;
pub mod scanner;
pub mod synth;

pub mod analysis;
pub mod diagnostic;

// === Tree walking and reporting ===
pub mod auditor;
pub mod reporter;
pub mod scan;

use std::path::PathBuf;
use thiserror::Error;

pub use analysis::{FileAnalysis, FixOutcome, analyze_source, fix_source};
pub use auditor::{
    AuditMode, AuditReport, AuditSummary, Auditor, FileWriter, SkippedFile, WriteFailure,
};
pub use config::{
    AnalysisConfig, ConfigLoader, FilesConfig, GeneralConfig, LoggingConfig, ScanConfig,
};
pub use diagnostic::{ChangeKind, Diagnostic, DocChange};
pub use docblock::{DocBlock, DocLine, TagEntry, TagKind};
pub use exports::{ExportForm, ExportRecord, ExportResolver};
pub use locator::{DocLocation, locate_doc_block};
pub use merge::DocMerger;
pub use params::{Parameter, extract_parameters};
pub use reporter::Reporter;
pub use scanner::{Declaration, DeclarationKind, DeclarationScanner};
pub use source::{BracketDepth, CodeBytes, SourceText};
pub use synth::{DocSynthesizer, SynthesizedDoc};

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Scan error types
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
