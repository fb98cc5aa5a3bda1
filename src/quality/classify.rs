//! Classification of diagnostics into issue types and severity tiers.
//!
//! Every function here is pure and total: any rule id, including none,
//! maps to exactly one issue type and one tier.
//!
//! | Input | Result |
//! |-------|--------|
//! | no rule id | code smell |
//! | rule id containing a bug fragment | bug |
//! | rule id containing a vulnerability keyword | vulnerability |
//! | anything else | code smell |
//!
//! Bug fragments are checked before vulnerability keywords, so a rule id
//! matching both is a bug.

use serde::{Deserialize, Serialize};

/// Rule-name fragments that identify real defects.
pub const BUG_RULE_FRAGMENTS: &[&str] = &[
    "no-all-duplicated-branches",
    "no-element-overwrite",
    "no-empty-collection",
    "no-extra-arguments",
    "no-identical-conditions",
    "no-identical-expressions",
    "no-ignored-return",
    "no-one-iteration-loop",
    "no-use-of-empty-return-value",
    "non-existent-operator",
    "no-collection-size-mischeck",
    "no-unreachable",
    "no-dupe-keys",
    "no-self-compare",
];

/// Keywords that identify security weaknesses.
pub const VULNERABILITY_KEYWORDS: &[&str] = &[
    "hardcoded-credentials",
    "hardcoded-password",
    "csrf",
    "encryption",
    "weak-ssl",
    "insecure-transport",
    "unverified-certificate",
    "socket",
    "confidential",
];

/// Keywords marking a rule as security-related for severity mapping.
const SECURITY_MARKERS: &[&str] = &["security", "vulnerability"];

/// What kind of problem a diagnostic represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Bug,
    Vulnerability,
    CodeSmell,
}

impl IssueType {
    /// Every issue type, in report order.
    pub const ALL: [IssueType; 3] = [Self::Bug, Self::Vulnerability, Self::CodeSmell];

    /// Label used in JSON output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Vulnerability => "vulnerability",
            Self::CodeSmell => "code_smell",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Five-level severity scale used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Blocker,
    Critical,
    Major,
    Minor,
    Info,
}

impl SeverityTier {
    /// Tier names as they appear in configuration and JSON.
    pub const NAMES: &'static [&'static str] = &["blocker", "critical", "major", "minor", "info"];

    /// Label used in JSON output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blocker => "blocker",
            Self::Critical => "critical",
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Info => "info",
        }
    }

    /// Blocker and critical issues should stop a commit.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocker | Self::Critical)
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lowered = haystack.to_lowercase();
    needles.iter().any(|needle| lowered.contains(needle))
}

/// Classify a diagnostic by its rule id.
#[must_use]
pub fn classify(rule_id: Option<&str>) -> IssueType {
    let Some(rule) = rule_id.filter(|r| !r.is_empty()) else {
        return IssueType::CodeSmell;
    };
    if contains_any(rule, BUG_RULE_FRAGMENTS) {
        IssueType::Bug
    } else if contains_any(rule, VULNERABILITY_KEYWORDS) {
        IssueType::Vulnerability
    } else {
        IssueType::CodeSmell
    }
}

/// Map the tool's binary severity onto the report scale.
///
/// Only `critical`, `major` and `minor` come out of this mapping; `blocker`
/// and `info` are reachable through severity overrides alone.
#[must_use]
pub fn map_severity(is_blocking: bool, rule_id: Option<&str>) -> SeverityTier {
    let security = rule_id.is_some_and(|rule| contains_any(rule, SECURITY_MARKERS));
    match (security, is_blocking) {
        (true, true) => SeverityTier::Critical,
        (true, false) => SeverityTier::Major,
        (false, true) => SeverityTier::Major,
        (false, false) => SeverityTier::Minor,
    }
}

/// Estimated remediation effort for an issue type.
#[must_use]
pub fn estimate_effort(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Bug => "30min",
        IssueType::Vulnerability => "1h",
        IssueType::CodeSmell => "10min",
    }
}

/// Effort for an issue-type label read from outside, e.g. a stored report.
///
/// Unknown labels get `15min`.
#[must_use]
pub fn estimate_effort_label(label: &str) -> &'static str {
    IssueType::ALL
        .iter()
        .find(|t| t.label() == label)
        .map(|t| estimate_effort(*t))
        .unwrap_or("15min")
}
