//! codeguard - unified code-quality configuration for JavaScript and
//! TypeScript projects
//!
//! One configuration file drives the linter, the formatter, the
//! commit-message checker, static analysis, git hooks and editor settings.
//! Linter output is normalized into a single report model.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Configuration discovery, deep merge, defaults and validation
//! - [`tools`] - Native configuration for each external tool
//! - [`quality`] - Classification and severity of linter diagnostics
//! - [`reporting`] - Report building and rendering
//! - [`hooks`] - Git hook installation
//! - [`ide`] - Editor workspace settings
//! - [`error`] - Custom error types and handling
//!
//! # Example
//!
//! ```rust,no_run
//! use codeguard::config::ConfigLoader;
//! use codeguard::tools::{lint, NodeModulesProbe};
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new(Path::new("."));
//! let config = loader.load();
//!
//! let lint_config = lint::build(&config, &NodeModulesProbe::new("."));
//! for fragment in lint_config.fragments() {
//!     println!("{}", fragment.name);
//! }
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod ide;
pub mod quality;
pub mod reporting;
pub mod tools;

// Re-export commonly used types
pub use error::{CodeguardError, IntoCodeguardError, Result};

// Re-export config types
pub use config::{
    validate, ConfigLoader, ConfigSource, ReportFormat, UnifiedConfig, ValidationResult,
};

// Re-export quality types
pub use quality::{
    classify, map_severity, FileResult, IssueType, NormalizedIssue, Normalizer, RawDiagnostic,
    SeverityTier,
};

// Re-export reporting types
pub use reporting::{Report, ReportBuilder, Summary};

// Re-export tool-config types
pub use tools::{Capability, ConfigFragment, LintToolConfig, PluginProbe};
