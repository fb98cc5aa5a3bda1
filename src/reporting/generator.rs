//! Report building from normalized diagnostics.
//!
//! A [`Report`] is the only thing renderers see. Its summary is computed from
//! the issues it holds and cannot be set independently.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::quality::{FileResult, IssueType, NormalizedIssue, Normalizer};

/// Used when no manifest names the project.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Issue counts per type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub bugs: usize,
    pub vulnerabilities: usize,
    pub code_smells: usize,
    pub total_issues: usize,
}

impl Summary {
    /// Count issues across file groups. `total_issues` is always the sum of
    /// the three type counts.
    #[must_use]
    pub fn from_files(files: &[FileIssues]) -> Self {
        let mut summary = Self::default();
        for issue in files.iter().flat_map(|f| &f.issues) {
            match issue.issue_type {
                IssueType::Bug => summary.bugs += 1,
                IssueType::Vulnerability => summary.vulnerabilities += 1,
                IssueType::CodeSmell => summary.code_smells += 1,
            }
        }
        summary.total_issues = summary.bugs + summary.vulnerabilities + summary.code_smells;
        summary
    }

    /// Count for one issue type.
    #[must_use]
    pub fn count(&self, issue_type: IssueType) -> usize {
        match issue_type {
            IssueType::Bug => self.bugs,
            IssueType::Vulnerability => self.vulnerabilities,
            IssueType::CodeSmell => self.code_smells,
        }
    }
}

/// Normalized issues for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileIssues {
    pub path: PathBuf,
    pub issues: Vec<NormalizedIssue>,
}

/// Result of one analysis run, ready for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    project_name: String,
    generated_at: DateTime<Utc>,
    summary: Summary,
    files: Vec<FileIssues>,
}

impl Report {
    /// Assemble a report. Files without issues are dropped and the summary is
    /// counted from what remains.
    #[must_use]
    pub fn new(project_name: impl Into<String>, files: Vec<FileIssues>) -> Self {
        let files: Vec<FileIssues> = files.into_iter().filter(|f| !f.issues.is_empty()).collect();
        Self {
            project_name: project_name.into(),
            generated_at: Utc::now(),
            summary: Summary::from_files(&files),
            files,
        }
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[must_use]
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    #[must_use]
    pub fn files(&self) -> &[FileIssues] {
        &self.files
    }

    /// All issues in file order.
    pub fn issues(&self) -> impl Iterator<Item = &NormalizedIssue> {
        self.files.iter().flat_map(|f| f.issues.iter())
    }

    /// True if any issue is blocker or critical.
    #[must_use]
    pub fn has_blocking_issues(&self) -> bool {
        self.issues().any(|issue| issue.severity.is_blocking())
    }
}

/// Builds a [`Report`] from raw tool output.
///
/// # Example
///
/// ```
/// use codeguard::quality::{DiagnosticSeverity, FileResult, RawDiagnostic};
/// use codeguard::reporting::ReportBuilder;
///
/// let results = vec![FileResult::new("a.ts").with_message(
///     RawDiagnostic::new(DiagnosticSeverity::Error, "same condition twice")
///         .with_rule("no-identical-conditions"),
/// )];
///
/// let report = ReportBuilder::new("web").build(&results);
/// assert_eq!(report.summary().bugs, 1);
/// assert_eq!(report.summary().total_issues, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    project_name: String,
    normalizer: Normalizer,
}

impl ReportBuilder {
    /// Create a builder for a named project.
    #[must_use]
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            normalizer: Normalizer::new(),
        }
    }

    /// Create a builder named after the nearest manifest above `dir`.
    #[must_use]
    pub fn for_project(dir: &Path) -> Self {
        Self::new(resolve_project_name(dir))
    }

    /// Use a configured normalizer (severity overrides).
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Normalize every diagnostic and fold the results into a report.
    #[must_use]
    pub fn build(&self, results: &[FileResult]) -> Report {
        let files = results
            .iter()
            .filter(|result| !result.is_clean())
            .map(|result| FileIssues {
                path: result.file_path.clone(),
                issues: result
                    .messages
                    .iter()
                    .map(|d| self.normalizer.normalize(d))
                    .collect(),
            })
            .collect();
        Report::new(self.project_name.clone(), files)
    }
}

/// Name of the project at `dir`, from the nearest `package.json` `name` or
/// else the nearest `Cargo.toml` `[package].name`.
///
/// The search stops at the first directory holding either manifest. Falls
/// back to [`UNKNOWN_PROJECT`] if that manifest cannot be read or has no name.
#[must_use]
pub fn resolve_project_name(dir: &Path) -> String {
    dir.ancestors()
        .find_map(manifest_name)
        .flatten()
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}

/// `None` if `dir` has no manifest, `Some(None)` if its manifest is unusable.
fn manifest_name(dir: &Path) -> Option<Option<String>> {
    let package_json = dir.join("package.json");
    if package_json.is_file() {
        return Some(read_package_json_name(&package_json));
    }
    let cargo_toml = dir.join("Cargo.toml");
    if cargo_toml.is_file() {
        return Some(read_cargo_toml_name(&cargo_toml));
    }
    None
}

fn read_package_json_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let manifest: serde_json::Value = serde_json::from_str(&content).ok()?;
    manifest
        .get("name")?
        .as_str()
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

fn read_cargo_toml_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let manifest: toml::Table = toml::from_str(&content).ok()?;
    manifest
        .get("package")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}
