//! Enrich raw diagnostics with classification, tier and effort.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::classify::{classify, estimate_effort, map_severity, IssueType, SeverityTier};
use super::diagnostics::{DiagnosticSeverity, Fix, RawDiagnostic};
use crate::config::StaticAnalysisConfig;

/// A diagnostic ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedIssue {
    pub rule_id: Option<String>,
    pub message: String,
    pub line: u32,
    pub column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    /// Severity as the tool reported it.
    pub tool_severity: DiagnosticSeverity,
    pub issue_type: IssueType,
    pub severity: SeverityTier,
    pub effort: String,
}

/// Applies classification to raw diagnostics, honouring per-rule tier
/// overrides from the static-analysis config.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    severity_overrides: BTreeMap<String, SeverityTier>,
}

impl Normalizer {
    /// Create a normalizer with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the overrides from the static-analysis section.
    #[must_use]
    pub fn from_config(config: &StaticAnalysisConfig) -> Self {
        Self {
            severity_overrides: config.severity_overrides.clone(),
        }
    }

    /// Force a tier for one rule id.
    #[must_use]
    pub fn with_override(mut self, rule_id: impl Into<String>, tier: SeverityTier) -> Self {
        self.severity_overrides.insert(rule_id.into(), tier);
        self
    }

    /// Classify one diagnostic.
    #[must_use]
    pub fn normalize(&self, diagnostic: &RawDiagnostic) -> NormalizedIssue {
        let rule_id = diagnostic.rule_id.as_deref();
        let issue_type = classify(rule_id);
        let severity = rule_id
            .and_then(|rule| self.severity_overrides.get(rule).copied())
            .unwrap_or_else(|| map_severity(diagnostic.severity.is_blocking(), rule_id));

        NormalizedIssue {
            rule_id: diagnostic.rule_id.clone(),
            message: diagnostic.message.clone(),
            line: diagnostic.line,
            column: diagnostic.column,
            end_line: diagnostic.end_line,
            end_column: diagnostic.end_column,
            fix: diagnostic.fix.clone(),
            tool_severity: diagnostic.severity,
            issue_type,
            severity,
            effort: estimate_effort(issue_type).to_string(),
        }
    }
}
