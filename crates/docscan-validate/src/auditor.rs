//! Audit Driver
//!
//! Discovers source files under the configured root and runs check or fix
//! mode over them on a fixed-size worker pool. Results are gathered in
//! discovery order into one [`AuditReport`].

use crate::analysis::{analyze_source, fix_source};
use crate::config::ScanConfig;
use crate::diagnostic::{ChangeKind, Diagnostic, DocChange};
use crate::scan::discover_files;
use crate::{Result, ScanError};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What the audit does with its findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// Report missing docs
    Check,
    /// Insert and complete docs in place
    Fix,
}

impl std::fmt::Display for AuditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Fix => write!(f, "fix"),
        }
    }
}

/// A file that could not be read
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// A file whose rewrite failed; it was left untouched
#[derive(Debug, Clone, Serialize)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Counts for a finished audit
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSummary {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub diagnostics: usize,
    pub docs_added: usize,
    pub docs_updated: usize,
    pub files_rewritten: usize,
    pub write_failures: usize,
}

/// Full audit result
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// RFC 3339 timestamp of the run
    pub timestamp: String,
    pub root: PathBuf,
    pub mode: AuditMode,
    pub summary: AuditSummary,
    pub diagnostics: Vec<Diagnostic>,
    pub changes: Vec<DocChange>,
    pub skipped: Vec<SkippedFile>,
    pub write_failures: Vec<WriteFailure>,
}

impl AuditReport {
    /// Whether the run found nothing to complain about
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty() && self.write_failures.is_empty()
    }

    /// Process exit code: `0` clean or fixed, `1` diagnostics or a failed write
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.passed())
    }
}

/// Outcome of one file
enum FileResult {
    Checked(Vec<Diagnostic>),
    Fixed {
        changes: Vec<DocChange>,
        rewritten: bool,
    },
    WriteFailed(WriteFailure),
    Skipped(SkippedFile),
}

/// Persists rewritten file content
pub type FileWriter = fn(&Path, &str) -> Result<()>;

/// Runs audits for one configuration
pub struct Auditor {
    config: ScanConfig,
    pool: rayon::ThreadPool,
    writer: FileWriter,
}

impl Auditor {
    /// Validate the configuration and build the worker pool
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.general.jobs)
            .build()?;
        Ok(Self {
            config,
            pool,
            writer: write_atomic,
        })
    }

    /// Replace how fix mode writes files (defaults to [`write_atomic`])
    pub fn with_writer(mut self, writer: FileWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Eligible files, sorted by path
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_files(&self.config.root, &self.config.files)
    }

    /// Run the audit over every discovered file
    pub fn run(&self, mode: AuditMode) -> Result<AuditReport> {
        let files = self.discover()?;
        tracing::debug!(root = %self.config.root.display(), files = files.len(), %mode, "Starting audit");

        let results: Vec<FileResult> = self
            .pool
            .install(|| files.par_iter().map(|path| self.process(path, mode)).collect());

        let mut report = AuditReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            root: self.config.root.clone(),
            mode,
            summary: AuditSummary {
                files_scanned: files.len(),
                ..AuditSummary::default()
            },
            diagnostics: Vec::new(),
            changes: Vec::new(),
            skipped: Vec::new(),
            write_failures: Vec::new(),
        };
        for result in results {
            match result {
                FileResult::Checked(diagnostics) => report.diagnostics.extend(diagnostics),
                FileResult::Fixed { changes, rewritten } => {
                    report.summary.files_rewritten += usize::from(rewritten);
                    report.changes.extend(changes);
                }
                FileResult::WriteFailed(failure) => report.write_failures.push(failure),
                FileResult::Skipped(skipped) => report.skipped.push(skipped),
            }
        }

        let summary = &mut report.summary;
        summary.files_skipped = report.skipped.len();
        summary.diagnostics = report.diagnostics.len();
        summary.docs_added = count_changes(&report.changes, ChangeKind::Added);
        summary.docs_updated = count_changes(&report.changes, ChangeKind::Updated);
        summary.write_failures = report.write_failures.len();
        tracing::info!(
            files = summary.files_scanned,
            skipped = summary.files_skipped,
            diagnostics = summary.diagnostics,
            added = summary.docs_added,
            updated = summary.docs_updated,
            "Audit finished"
        );
        Ok(report)
    }

    fn process(&self, path: &Path, mode: AuditMode) -> FileResult {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Skipping unreadable file");
                return FileResult::Skipped(SkippedFile {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
            }
        };

        let analysis = &self.config.analysis;
        match mode {
            AuditMode::Check => {
                let result = analyze_source(path, &text, analysis);
                tracing::debug!(
                    path = %path.display(),
                    declarations = result.declarations.len(),
                    exports = result.exports.len(),
                    missing = result.diagnostics.len(),
                    "Checked file"
                );
                FileResult::Checked(result.diagnostics)
            }
            AuditMode::Fix => {
                let outcome = fix_source(path, &text, analysis);
                let Some(content) = outcome.content else {
                    return FileResult::Fixed {
                        changes: outcome.changes,
                        rewritten: false,
                    };
                };
                match (self.writer)(path, &content) {
                    Ok(()) => {
                        tracing::debug!(path = %path.display(), changes = outcome.changes.len(), "Rewrote file");
                        FileResult::Fixed {
                            changes: outcome.changes,
                            rewritten: true,
                        }
                    }
                    Err(err) => {
                        tracing::error!(path = %path.display(), error = %err, "Failed to write file");
                        FileResult::WriteFailed(WriteFailure {
                            path: path.to_path_buf(),
                            reason: err.to_string(),
                        })
                    }
                }
            }
        }
    }
}

fn count_changes(changes: &[DocChange], kind: ChangeKind) -> usize {
    changes.iter().filter(|c| c.kind == kind).count()
}

/// Write through a temporary file in the same directory, then rename over `path`
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ScanError::io(dir, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| ScanError::io(temp.path(), e))?;
    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| ScanError::io(temp.path(), e))?;
    }
    temp.persist(path)
        .map_err(|e| ScanError::io(path, e.error))?;
    Ok(())
}
