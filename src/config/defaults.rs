//! Production defaults for every configuration section.
//!
//! The section `Default` impls in [`crate::config`] read from here, so the
//! values below are the single source of truth for what an unconfigured
//! project gets.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use super::UnifiedConfig;

/// Paths the linter never looks at unless the user removes them.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "coverage",
    ".next",
    "out",
    "*.min.js",
];

/// Shared configurations the commit-rule engine extends.
pub const DEFAULT_COMMIT_EXTENDS: &[&str] = &["@commitlint/config-conventional"];

/// Commit types accepted by the default `type-enum` rule.
pub const COMMIT_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// Formatter defaults.
pub const DEFAULT_TAB_WIDTH: u32 = 2;
pub const DEFAULT_PRINT_WIDTH: u32 = 100;

/// Where reports land when the user does not say otherwise.
pub const DEFAULT_REPORT_DIR: &str = "reports";

/// Default commit-message rules.
#[must_use]
pub fn commit_rules() -> Map<String, Value> {
    let mut rules = Map::new();
    rules.insert("type-enum".into(), json!([2, "always", COMMIT_TYPES]));
    rules.insert(
        "subject-case".into(),
        json!([
            2,
            "never",
            ["sentence-case", "start-case", "pascal-case", "upper-case"]
        ]),
    );
    rules.insert(
        "header-max-length".into(),
        json!([2, "always", DEFAULT_PRINT_WIDTH]),
    );
    rules
}

/// Default static-analysis rule set.
///
/// The bug-detection rules are errors; the maintainability rules are warnings.
#[must_use]
pub fn static_analysis_rules() -> Map<String, Value> {
    let mut rules = Map::new();
    for rule in [
        "sonarjs/no-all-duplicated-branches",
        "sonarjs/no-element-overwrite",
        "sonarjs/no-empty-collection",
        "sonarjs/no-extra-arguments",
        "sonarjs/no-identical-conditions",
        "sonarjs/no-identical-expressions",
        "sonarjs/no-ignored-return",
        "sonarjs/no-one-iteration-loop",
        "sonarjs/no-use-of-empty-return-value",
        "sonarjs/non-existent-operator",
    ] {
        rules.insert(rule.into(), json!("error"));
    }
    rules.insert("sonarjs/cognitive-complexity".into(), json!(["warn", 15]));
    rules.insert("sonarjs/no-duplicate-string".into(), json!(["warn", 3]));
    rules.insert("sonarjs/no-identical-functions".into(), json!("warn"));
    rules.insert("sonarjs/no-collapsible-if".into(), json!("warn"));
    rules.insert("sonarjs/prefer-immediate-return".into(), json!("warn"));
    rules
}

/// Default git hook commands.
#[must_use]
pub fn hooks() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "pre-commit".to_string(),
            "npx --no-install lint-staged".to_string(),
        ),
        (
            "commit-msg".to_string(),
            "npx --no-install commitlint --edit \"$1\"".to_string(),
        ),
    ])
}

/// The fully defaulted configuration.
#[must_use]
pub fn default_config() -> UnifiedConfig {
    UnifiedConfig::default()
}

/// The fully defaulted configuration as a JSON tree, the base of every merge.
///
/// # Errors
///
/// Returns an error only if serialization of the configuration types fails.
pub fn default_value() -> serde_json::Result<Value> {
    serde_json::to_value(default_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignore_patterns_contain_build_outputs() {
        assert!(DEFAULT_IGNORE_PATTERNS.contains(&"node_modules"));
        assert!(DEFAULT_IGNORE_PATTERNS.contains(&"dist"));
        assert!(DEFAULT_IGNORE_PATTERNS.contains(&"coverage"));
    }

    #[test]
    fn test_commit_rules_limit_header_to_print_width() {
        let rules = commit_rules();
        assert_eq!(rules["header-max-length"], json!([2, "always", 100]));
        assert_eq!(rules["type-enum"][2].as_array().map(Vec::len), Some(11));
    }

    #[test]
    fn test_static_analysis_bug_rules_are_errors() {
        let rules = static_analysis_rules();
        assert_eq!(rules["sonarjs/no-identical-conditions"], json!("error"));
        assert_eq!(rules["sonarjs/cognitive-complexity"], json!(["warn", 15]));
    }

    #[test]
    fn test_default_value_is_fully_populated() {
        let value = default_value().unwrap();
        for section in ["lint", "format", "commitRules", "staticAnalysis", "hooks", "ide"] {
            assert!(value.get(section).is_some(), "missing section {section}");
        }
        assert_eq!(value["format"]["semi"], json!(true));
        assert_eq!(value["format"]["printWidth"], json!(100));
    }

    #[test]
    fn test_default_hooks() {
        let hooks = hooks();
        assert!(hooks["commit-msg"].contains("commitlint"));
        assert!(hooks.contains_key("pre-commit"));
    }
}
