//! Configuration types
//!
//! Every section deserializes with defaults, so a `docscan.toml` only needs
//! the keys it wants to change:
//!
//! ```toml
//! root = "web/src"
//!
//! [files]
//! exclude_globs = ["**/__generated__/**"]
//!
//! [analysis]
//! hoc_wrappers = ["memo", "forwardRef", "styled"]
//! ```

use crate::constants::{
    DEFAULT_EXCLUDED_SUFFIXES, DEFAULT_EXTENSIONS, DEFAULT_HOC_WRAPPERS, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_SIGNATURE_LINES, DEFAULT_ROOT, DEFAULT_SKIP_DIRS,
};
use crate::{Result, ScanError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory the walk starts from
    pub root: PathBuf,
    pub general: GeneralConfig,
    pub files: FilesConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            general: GeneralConfig::default(),
            files: FilesConfig::default(),
            analysis: AnalysisConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Replace the scan root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the worker count (0 = one per CPU)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.general.jobs = jobs;
        self
    }

    /// Add an exclude glob (matched against the path relative to the root)
    pub fn with_exclude_glob(mut self, pattern: impl Into<String>) -> Self {
        self.files.exclude_globs.push(pattern.into());
        self
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.files.extensions.is_empty() {
            return Err(ScanError::Config(
                "files.extensions must list at least one extension".to_string(),
            ));
        }
        if self.analysis.max_signature_lines == 0 {
            return Err(ScanError::Config(
                "analysis.max_signature_lines cannot be 0".to_string(),
            ));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "warning" | "error"
        ) {
            return Err(ScanError::Config(format!(
                "Invalid log level: {}. Use trace, debug, info, warn, or error",
                self.logging.level
            )));
        }
        self.files.exclude_set()?;
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Worker threads for per-file processing (0 = one per CPU)
    pub jobs: usize,
}

/// File selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Extensions (without the dot) that are scanned
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
    /// File name suffixes that are never scanned
    pub excluded_suffixes: Vec<String>,
    /// Extra glob patterns, relative to the root
    pub exclude_globs: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: owned(DEFAULT_EXTENSIONS),
            skip_dirs: owned(DEFAULT_SKIP_DIRS),
            excluded_suffixes: owned(DEFAULT_EXCLUDED_SUFFIXES),
            exclude_globs: Vec::new(),
        }
    }
}

impl FilesConfig {
    /// Compile `exclude_globs`
    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }

    /// Whether a directory name is a dependency cache
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }

    /// Whether a file is eligible by extension and suffix
    pub fn is_eligible_file(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));
        has_extension
            && !self
                .excluded_suffixes
                .iter()
                .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

/// Heuristic knobs for the scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Callees that wrap a component definition (`memo(...)`, `forwardRef(...)`)
    pub hoc_wrappers: Vec<String>,
    /// Also require docs on exported non-callable `const`/`let`/`var` bindings
    pub include_variables: bool,
    /// Lines read past a declaration while balancing its parameter list
    pub max_signature_lines: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hoc_wrappers: owned(DEFAULT_HOC_WRAPPERS),
            include_variables: false,
            max_signature_lines: DEFAULT_MAX_SIGNATURE_LINES,
        }
    }
}

impl AnalysisConfig {
    pub fn is_wrapper(&self, callee: &str) -> bool {
        self.hoc_wrappers.iter().any(|w| w == callee)
    }
}

/// Logging settings consumed by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when `DOCSCAN_LOG` is unset
    pub level: String,
    /// Emit JSON log records
    pub json_format: bool,
    /// Also write logs to this file
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
