//! Shared defaults and markers

/// Default directory scanned when no root is given
pub const DEFAULT_ROOT: &str = "src";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "docscan.toml";

/// Prefix for environment overrides (e.g. `DOCSCAN_GENERAL__JOBS`)
pub const CONFIG_ENV_PREFIX: &str = "DOCSCAN";

/// Source file extensions considered by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Dependency-cache directories that are never descended into
pub const DEFAULT_SKIP_DIRS: &[&str] = &["node_modules"];

/// Declaration-only, spec/test and generated file suffixes
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[
    ".d.ts",
    ".spec.ts",
    ".spec.tsx",
    ".test.ts",
    ".test.tsx",
    ".generated.ts",
    ".generated.tsx",
    ".gen.ts",
];

/// Call expressions that wrap a component definition
pub const DEFAULT_HOC_WRAPPERS: &[&str] = &[
    "memo",
    "React.memo",
    "forwardRef",
    "React.forwardRef",
    "observer",
];

/// Upper bound on lines read while looking for a balancing `)`
pub const DEFAULT_MAX_SIGNATURE_LINES: usize = 200;

/// Tag written into synthesized blocks that carry no parameter knowledge
pub const PLACEHOLDER_TAG: &str = "@docscan-placeholder";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";
