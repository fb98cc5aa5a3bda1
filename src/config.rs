//! Unified configuration for codeguard.
//!
//! One file configures five tools. The resolved [`UnifiedConfig`] is always
//! fully populated: every field carries a production default (see
//! [`defaults`]) that a user file can override through [`merge`].

pub mod defaults;
pub mod merge;
pub mod resolution;
pub mod validation;

pub use resolution::{ConfigFormat, ConfigLoader, ConfigSource, CONFIG_CANDIDATES};
pub use validation::{validate, ValidationResult};

use crate::quality::SeverityTier;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the tool, used for file names and the `package.json` key.
pub const TOOL_NAME: &str = "codeguard";

/// The resolved configuration governing every sub-tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedConfig {
    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub commit_rules: CommitRulesConfig,

    #[serde(default)]
    pub static_analysis: StaticAnalysisConfig,

    /// Git hook name -> shell command, handed to the hook installer verbatim.
    #[serde(default = "defaults::hooks")]
    pub hooks: BTreeMap<String, String>,

    /// Write editor settings for the project.
    #[serde(default = "default_true")]
    pub ide: bool,

    /// Keys codeguard does not know. Kept so newer config files still load.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl Default for UnifiedConfig {
    fn default() -> Self {
        Self {
            lint: LintConfig::default(),
            format: FormatConfig::default(),
            commit_rules: CommitRulesConfig::default(),
            static_analysis: StaticAnalysisConfig::default(),
            hooks: defaults::hooks(),
            ide: true, // Match the serde default
            extra: Map::new(),
        }
    }
}

impl UnifiedConfig {
    /// Directory reports are written to, relative to `project_dir`.
    #[must_use]
    pub fn report_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.static_analysis.report.output_dir)
    }
}

// ============================================================================
// Lint
// ============================================================================

/// Linter section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LintConfig {
    pub enabled: bool,
    /// Base JavaScript recommended rules.
    pub javascript: bool,
    /// TypeScript parser and rules.
    pub typescript: bool,
    /// React plugin, including hooks and accessibility sub-blocks.
    pub react: bool,
    /// Import ordering plugin.
    pub imports: bool,
    pub ignore_patterns: Vec<String>,
    /// Raw rule overrides, applied after every generated block.
    pub rules: Map<String, Value>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            javascript: true,
            typescript: true,
            react: false,
            imports: true,
            ignore_patterns: defaults::DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rules: Map::new(),
        }
    }
}

// ============================================================================
// Format
// ============================================================================

/// Trailing comma style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    None,
    Es5,
    All,
}

/// Parentheses around a sole arrow function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowParens {
    Always,
    Avoid,
}

/// Line ending style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    Lf,
    Crlf,
    Cr,
    Auto,
}

/// Formatter section. Already shaped like the formatter's own options, apart
/// from `enabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatConfig {
    pub enabled: bool,
    pub semi: bool,
    pub single_quote: bool,
    pub tab_width: u32,
    pub use_tabs: bool,
    pub print_width: u32,
    pub trailing_comma: TrailingComma,
    pub bracket_spacing: bool,
    pub arrow_parens: ArrowParens,
    pub end_of_line: EndOfLine,
    /// Any other formatter option, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            semi: true,
            single_quote: true,
            tab_width: defaults::DEFAULT_TAB_WIDTH,
            use_tabs: false,
            print_width: defaults::DEFAULT_PRINT_WIDTH,
            trailing_comma: TrailingComma::Es5,
            bracket_spacing: true,
            arrow_parens: ArrowParens::Always,
            end_of_line: EndOfLine::Lf,
            extra: Map::new(),
        }
    }
}

// ============================================================================
// Commit rules
// ============================================================================

/// Commit-message rules section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommitRulesConfig {
    pub enabled: bool,
    pub extends: Vec<String>,
    pub rules: Map<String, Value>,
}

impl Default for CommitRulesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extends: defaults::DEFAULT_COMMIT_EXTENDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rules: defaults::commit_rules(),
        }
    }
}

// ============================================================================
// Static analysis
// ============================================================================

/// Which report files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Html,
    Json,
    #[default]
    Both,
}

impl ReportFormat {
    /// Whether an HTML report is written.
    #[must_use]
    pub fn includes_html(&self) -> bool {
        matches!(self, Self::Html | Self::Both)
    }

    /// Whether a JSON report is written.
    #[must_use]
    pub fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportSettings {
    pub format: ReportFormat,
    pub output_dir: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            output_dir: defaults::DEFAULT_REPORT_DIR.to_string(),
        }
    }
}

/// Static-analysis section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticAnalysisConfig {
    pub enabled: bool,
    pub rules: Map<String, Value>,
    pub report: ReportSettings,
    /// Rule id -> tier. The only way a diagnostic becomes `blocker` or `info`.
    pub severity_overrides: BTreeMap<String, SeverityTier>,
}

impl Default for StaticAnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rules: defaults::static_analysis_rules(),
            report: ReportSettings::default(),
            severity_overrides: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unified_config_default() {
        let config = UnifiedConfig::default();
        assert!(config.lint.enabled);
        assert!(config.format.semi);
        assert_eq!(config.format.print_width, 100);
        assert_eq!(config.format.tab_width, 2);
        assert!(config.commit_rules.enabled);
        assert!(config.static_analysis.enabled);
        assert_eq!(config.static_analysis.report.format, ReportFormat::Both);
        assert!(config.ide);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_empty_object_deserializes_to_defaults() {
        let config: UnifiedConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, UnifiedConfig::default());
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let value = serde_json::to_value(UnifiedConfig::default()).unwrap();
        assert!(value.get("commitRules").is_some());
        assert!(value.get("staticAnalysis").is_some());
        assert!(value["lint"].get("ignorePatterns").is_some());
        assert_eq!(value["format"]["trailingComma"], json!("es5"));
        assert_eq!(value["format"]["endOfLine"], json!("lf"));
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let config: UnifiedConfig =
            serde_json::from_value(json!({"future": {"enabled": true}, "ide": false})).unwrap();
        assert!(!config.ide);
        assert_eq!(config.extra["future"], json!({"enabled": true}));

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["future"], json!({"enabled": true}));
    }

    #[test]
    fn test_format_extra_options_pass_through() {
        let config: UnifiedConfig =
            serde_json::from_value(json!({"format": {"jsxSingleQuote": true}})).unwrap();
        assert_eq!(config.format.extra["jsxSingleQuote"], json!(true));
        assert!(config.format.semi);
    }

    #[test]
    fn test_severity_overrides_parse() {
        let config: UnifiedConfig = serde_json::from_value(json!({
            "staticAnalysis": {"severityOverrides": {"no-eval": "blocker"}}
        }))
        .unwrap();
        assert_eq!(
            config.static_analysis.severity_overrides.get("no-eval"),
            Some(&SeverityTier::Blocker)
        );
    }

    #[test]
    fn test_report_format_includes() {
        assert!(ReportFormat::Both.includes_html());
        assert!(ReportFormat::Both.includes_json());
        assert!(ReportFormat::Html.includes_html());
        assert!(!ReportFormat::Html.includes_json());
        assert!(!ReportFormat::Json.includes_html());
    }

    #[test]
    fn test_report_dir() {
        let config = UnifiedConfig::default();
        assert_eq!(
            config.report_dir(Path::new("/work")),
            PathBuf::from("/work/reports")
        );
    }
}
