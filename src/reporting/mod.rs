//! Quality reports built from normalized diagnostics.
//!
//! - [`generator`] - Builds a [`Report`] from per-file linter results
//! - [`render`] - Console, JSON and HTML output, and report files on disk
//!
//! # Example
//!
//! ```rust
//! use codeguard::quality::{DiagnosticSeverity, FileResult, RawDiagnostic};
//! use codeguard::reporting::{render_json, ReportBuilder};
//!
//! let diagnostic = RawDiagnostic::new(DiagnosticSeverity::Warning, "unused")
//!     .with_rule("no-unused-vars");
//! let report = ReportBuilder::new("web")
//!     .build(&[FileResult::new("a.ts").with_message(diagnostic)]);
//!
//! let json = render_json(&report).unwrap();
//! assert!(json.contains("\"codeSmells\": 1"));
//! ```

pub mod generator;
pub mod render;

pub use generator::{
    resolve_project_name, FileIssues, Report, ReportBuilder, Summary, UNKNOWN_PROJECT,
};
pub use render::{
    render_console, render_html, render_json, write_reports, HTML_REPORT_FILE, JSON_REPORT_FILE,
};
