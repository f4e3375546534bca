//! Configuration Module
//!
//! Provides layered configuration for docscan: built-in defaults, an optional
//! `docscan.toml`, and `DOCSCAN_` environment overrides.

mod file_config;
mod loader;

pub use file_config::{AnalysisConfig, FilesConfig, GeneralConfig, LoggingConfig, ScanConfig};
pub use loader::ConfigLoader;
