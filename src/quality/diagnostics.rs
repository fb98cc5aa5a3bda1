//! Raw diagnostics as reported by the external linter.
//!
//! The shapes follow the linter's JSON formatter output, so a run's output
//! can be deserialized directly:
//!
//! ```json
//! [{
//!   "filePath": "src/a.ts",
//!   "messages": [{
//!     "ruleId": "no-unused-vars", "severity": 2, "message": "x is unused",
//!     "line": 3, "column": 7, "endLine": 3, "endColumn": 8,
//!     "fix": {"range": [40, 52], "text": ""}
//!   }]
//! }]
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::error::{CodeguardError, Result};

/// Severity as the linter reports it: `1` for warnings, `2` for errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

impl DiagnosticSeverity {
    /// Errors block; warnings do not.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Decode the linter's numeric severity.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Warning),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    /// The linter's numeric severity.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Warning => 1,
            Self::Error => 2,
        }
    }
}

impl Serialize for DiagnosticSeverity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for DiagnosticSeverity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown diagnostic severity {code}, expected 1 or 2"
            ))
        })
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A byte-range replacement that fixes a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Start and end byte offsets of the replaced text.
    pub range: (usize, usize),
    /// Replacement text.
    pub text: String,
}

/// One issue at one location in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiagnostic {
    /// Rule that fired. `None` for parse errors and other rule-less issues.
    #[serde(default)]
    pub rule_id: Option<String>,
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// 1-based line.
    #[serde(default = "first_position")]
    pub line: u32,
    /// 1-based column.
    #[serde(default = "first_position")]
    pub column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

fn first_position() -> u32 {
    1
}

impl RawDiagnostic {
    /// Create a diagnostic at line 1, column 1 with no rule.
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            rule_id: None,
            severity,
            message: message.into(),
            line: 1,
            column: 1,
            end_line: None,
            end_column: None,
            fix: None,
        }
    }

    /// Set the rule that fired.
    #[must_use]
    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    /// Set the start position.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Set the end position.
    #[must_use]
    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    /// Attach a fix.
    #[must_use]
    pub fn with_fix(mut self, start: usize, end: usize, text: impl Into<String>) -> Self {
        self.fix = Some(Fix {
            range: (start, end),
            text: text.into(),
        });
        self
    }
}

/// Diagnostics for a single file, in the order the tool reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    pub file_path: PathBuf,
    #[serde(default)]
    pub messages: Vec<RawDiagnostic>,
}

impl FileResult {
    /// Create an empty result for a file.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            messages: Vec::new(),
        }
    }

    /// Append a diagnostic.
    #[must_use]
    pub fn with_message(mut self, diagnostic: RawDiagnostic) -> Self {
        self.messages.push(diagnostic);
        self
    }

    /// True if the file has no diagnostics.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Parse the linter's JSON output into per-file results.
///
/// # Errors
///
/// Returns an error if the text is not the expected JSON shape.
pub fn parse_lint_output(json: &str) -> Result<Vec<FileResult>> {
    serde_json::from_str(json).map_err(|e| CodeguardError::tool_output("linter", e.to_string()))
}
