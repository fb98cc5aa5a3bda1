//! Structural validation of a raw configuration tree.
//!
//! Validation is advisory: it never blocks loading or merging, and it never
//! fails. It walks every known section independently and returns all
//! problems at once so the caller can show them together.
//!
//! # Example
//!
//! ```rust
//! use codeguard::config::validate;
//! use serde_json::json;
//!
//! let result = validate(&json!({"format": {"trailingComma": "sometimes"}, "hooks": []}));
//! assert!(!result.valid);
//! assert_eq!(result.errors.len(), 2);
//! ```

use globset::Glob;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::hooks::GIT_HOOK_NAMES;
use crate::quality::SeverityTier;

const TRAILING_COMMA: &[&str] = &["none", "es5", "all"];
const ARROW_PARENS: &[&str] = &["always", "avoid"];
const END_OF_LINE: &[&str] = &["lf", "crlf", "cr", "auto"];
const REPORT_FORMATS: &[&str] = &["html", "json", "both"];

/// Outcome of validating a configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True when `errors` is empty.
    pub valid: bool,
    /// Every problem found, in section order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Returns the exit code for the validation.
    ///
    /// Returns 0 if valid, 1 if invalid.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.valid {
            0
        } else {
            1
        }
    }

    /// Generate a human-readable summary of the validation result.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.valid {
            "Configuration is valid.".to_string()
        } else {
            format!(
                "Configuration is invalid with {} error(s).",
                self.errors.len()
            )
        }
    }
}

/// Validate a raw configuration tree against the schema.
#[must_use]
pub fn validate(candidate: &Value) -> ValidationResult {
    let Some(root) = candidate.as_object() else {
        return ValidationResult::from_errors(vec!["configuration must be an object".to_string()]);
    };

    let mut errors = Vec::new();
    if let Some(section) = section(root, "lint", &mut errors) {
        validate_lint(section, &mut errors);
    }
    if let Some(section) = section(root, "format", &mut errors) {
        validate_format(section, &mut errors);
    }
    if let Some(section) = section(root, "commitRules", &mut errors) {
        validate_commit_rules(section, &mut errors);
    }
    if let Some(section) = section(root, "staticAnalysis", &mut errors) {
        validate_static_analysis(section, &mut errors);
    }
    if let Some(section) = section(root, "hooks", &mut errors) {
        validate_hooks(section, &mut errors);
    }
    expect_bool(root, "", "ide", &mut errors);

    ValidationResult::from_errors(errors)
}

/// Fetch an optional object-valued section, recording an error if it has the
/// wrong shape.
fn section<'a>(
    root: &'a Map<String, Value>,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a Map<String, Value>> {
    match root.get(name)? {
        Value::Object(map) => Some(map),
        _ => {
            errors.push(format!("{name} must be an object"));
            None
        }
    }
}

fn validate_lint(lint: &Map<String, Value>, errors: &mut Vec<String>) {
    for key in ["enabled", "javascript", "typescript", "react", "imports"] {
        expect_bool(lint, "lint", key, errors);
    }
    if let Some(patterns) = expect_string_array(lint, "lint", "ignorePatterns", errors) {
        for (i, pattern) in patterns.iter().enumerate() {
            if let Err(e) = Glob::new(pattern) {
                errors.push(format!(
                    "lint.ignorePatterns[{i}] is not a valid glob: {}",
                    e.kind()
                ));
            }
        }
    }
    expect_object(lint, "lint", "rules", errors);
}

fn validate_format(format: &Map<String, Value>, errors: &mut Vec<String>) {
    for key in ["enabled", "semi", "singleQuote", "useTabs", "bracketSpacing"] {
        expect_bool(format, "format", key, errors);
    }
    for key in ["tabWidth", "printWidth"] {
        if let Some(value) = format.get(key) {
            if value.as_u64().is_none() {
                errors.push(format!("format.{key} must be a non-negative integer"));
            }
        }
    }
    expect_one_of(format, "format", "trailingComma", TRAILING_COMMA, errors);
    expect_one_of(format, "format", "arrowParens", ARROW_PARENS, errors);
    expect_one_of(format, "format", "endOfLine", END_OF_LINE, errors);
}

fn validate_commit_rules(commit: &Map<String, Value>, errors: &mut Vec<String>) {
    expect_bool(commit, "commitRules", "enabled", errors);
    expect_string_array(commit, "commitRules", "extends", errors);
    expect_object(commit, "commitRules", "rules", errors);
}

fn validate_static_analysis(analysis: &Map<String, Value>, errors: &mut Vec<String>) {
    expect_bool(analysis, "staticAnalysis", "enabled", errors);
    expect_object(analysis, "staticAnalysis", "rules", errors);

    if let Some(report) = expect_object(analysis, "staticAnalysis", "report", errors) {
        expect_one_of(report, "staticAnalysis.report", "format", REPORT_FORMATS, errors);
        if let Some(dir) = report.get("outputDir") {
            if !dir.is_string() {
                errors.push("staticAnalysis.report.outputDir must be a string".to_string());
            }
        }
    }

    if let Some(overrides) = expect_object(analysis, "staticAnalysis", "severityOverrides", errors)
    {
        let allowed = SeverityTier::NAMES.join(", ");
        for (rule, tier) in overrides {
            let known = tier
                .as_str()
                .is_some_and(|t| SeverityTier::NAMES.contains(&t));
            if !known {
                errors.push(format!(
                    "staticAnalysis.severityOverrides.{rule} must be one of: {allowed}"
                ));
            }
        }
    }
}

fn validate_hooks(hooks: &Map<String, Value>, errors: &mut Vec<String>) {
    for (name, command) in hooks {
        if !GIT_HOOK_NAMES.contains(&name.as_str()) {
            errors.push(format!("hooks.{name} is not a git hook name"));
        }
        if !command.is_string() {
            errors.push(format!("hooks.{name} must be a string command"));
        }
    }
}

// ============================================================================
// Field checks
// ============================================================================

fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn expect_bool(map: &Map<String, Value>, prefix: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = map.get(key) {
        if !value.is_boolean() {
            errors.push(format!("{} must be a boolean", field_path(prefix, key)));
        }
    }
}

fn expect_object<'a>(
    map: &'a Map<String, Value>,
    prefix: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<&'a Map<String, Value>> {
    match map.get(key)? {
        Value::Object(inner) => Some(inner),
        _ => {
            errors.push(format!("{} must be an object", field_path(prefix, key)));
            None
        }
    }
}

/// Check for an array of strings; returns the strings when the shape is right.
fn expect_string_array<'a>(
    map: &'a Map<String, Value>,
    prefix: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<Vec<&'a str>> {
    let value = map.get(key)?;
    let Some(items) = value.as_array() else {
        errors.push(format!("{} must be an array", field_path(prefix, key)));
        return None;
    };
    let strings: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    if strings.len() != items.len() {
        errors.push(format!(
            "{} must contain only strings",
            field_path(prefix, key)
        ));
        return None;
    }
    Some(strings)
}

fn expect_one_of(
    map: &Map<String, Value>,
    prefix: &str,
    key: &str,
    allowed: &[&str],
    errors: &mut Vec<String>,
) {
    let Some(value) = map.get(key) else {
        return;
    };
    let ok = value.as_str().is_some_and(|s| allowed.contains(&s));
    if !ok {
        errors.push(format!(
            "{} must be one of: {}",
            field_path(prefix, key),
            allowed.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_is_single_error() {
        for candidate in [json!(null), json!([1]), json!("x"), json!(3)] {
            let result = validate(&candidate);
            assert!(!result.valid);
            assert_eq!(result.errors, vec!["configuration must be an object"]);
        }
    }

    #[test]
    fn test_empty_object_is_valid() {
        let result = validate(&json!({}));
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_defaults_are_valid() {
        let defaults = crate::config::defaults::default_value().unwrap();
        let result = validate(&defaults);
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_lint_rules_must_be_object() {
        let result = validate(&json!({"lint": {"rules": ["no-console"]}}));
        assert_eq!(result.errors, vec!["lint.rules must be an object"]);
    }

    #[test]
    fn test_ignore_patterns_must_be_string_array() {
        let result = validate(&json!({"lint": {"ignorePatterns": "dist"}}));
        assert_eq!(result.errors, vec!["lint.ignorePatterns must be an array"]);

        let result = validate(&json!({"lint": {"ignorePatterns": ["dist", 3]}}));
        assert_eq!(
            result.errors,
            vec!["lint.ignorePatterns must contain only strings"]
        );
    }

    #[test]
    fn test_invalid_glob_reported() {
        let result = validate(&json!({"lint": {"ignorePatterns": ["src/[a-"]}}));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("lint.ignorePatterns[0] is not a valid glob"));
    }

    #[test]
    fn test_enumerated_options() {
        let result = validate(&json!({
            "format": {"trailingComma": "some", "arrowParens": "never", "endOfLine": "lf"},
            "staticAnalysis": {"report": {"format": "pdf"}}
        }));
        assert_eq!(
            result.errors,
            vec![
                "format.trailingComma must be one of: none, es5, all",
                "format.arrowParens must be one of: always, avoid",
                "staticAnalysis.report.format must be one of: html, json, both",
            ]
        );
    }

    #[test]
    fn test_numeric_options() {
        let result = validate(&json!({"format": {"tabWidth": -2, "printWidth": "80"}}));
        assert_eq!(
            result.errors,
            vec![
                "format.tabWidth must be a non-negative integer",
                "format.printWidth must be a non-negative integer",
            ]
        );
    }

    #[test]
    fn test_errors_accumulate_across_sections() {
        let result = validate(&json!({
            "lint": {"enabled": "yes"},
            "format": 4,
            "commitRules": {"extends": "conventional"},
            "hooks": {"pre-commit": 1, "before-lunch": "echo"},
            "ide": "vscode"
        }));
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "lint.enabled must be a boolean",
                "format must be an object",
                "commitRules.extends must be an array",
                "hooks.before-lunch is not a git hook name",
                "hooks.pre-commit must be a string command",
                "ide must be a boolean",
            ]
        );
        assert_eq!(result.exit_code(), 1);
        assert!(result.summary().contains("6 error(s)"));
    }

    #[test]
    fn test_severity_overrides_values() {
        let result = validate(&json!({
            "staticAnalysis": {"severityOverrides": {"no-eval": "blocker", "eqeqeq": "urgent"}}
        }));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("staticAnalysis.severityOverrides.eqeqeq"));
    }

    #[test]
    fn test_unknown_top_level_keys_are_ignored() {
        assert!(validate(&json!({"experimental": {"anything": [1, 2]}})).valid);
    }
}
