//! Result normalization.
//!
//! External tools report issues in their own terms: a rule id (sometimes
//! none) and an error/warning flag. This module turns those into a common
//! shape for reporting:
//!
//! - [`diagnostics`] - Raw per-file diagnostics as the linter emits them
//! - [`classify`] - Issue type, severity tier and effort lookups
//! - [`normalize`] - Applies the lookups to raw diagnostics
//!
//! # Example
//!
//! ```rust
//! use codeguard::quality::{classify, map_severity, IssueType, SeverityTier};
//!
//! assert_eq!(classify(Some("no-identical-conditions")), IssueType::Bug);
//! assert_eq!(classify(Some("no-hardcoded-credentials")), IssueType::Vulnerability);
//! assert_eq!(classify(None), IssueType::CodeSmell);
//! assert_eq!(map_severity(true, Some("security/no-foo")), SeverityTier::Critical);
//! ```

pub mod classify;
pub mod diagnostics;
pub mod normalize;

pub use classify::{
    classify, estimate_effort, estimate_effort_label, map_severity, IssueType, SeverityTier,
    BUG_RULE_FRAGMENTS, VULNERABILITY_KEYWORDS,
};
pub use diagnostics::{parse_lint_output, DiagnosticSeverity, FileResult, Fix, RawDiagnostic};
pub use normalize::{NormalizedIssue, Normalizer};
