//! Linter configuration as an ordered list of fragments.
//!
//! Fragment order is the precedence order. Each fragment may only add or
//! override what earlier fragments set, and the user's own rules always come
//! last:
//!
//! 1. `ignores`
//! 2. `javascript`
//! 3. `typescript`
//! 4. `react`, `react-hooks`, `jsx-a11y`
//! 5. `imports`
//! 6. `static-analysis`
//! 7. `user-overrides`

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::capabilities::{Capability, PluginProbe};
use crate::config::merge::merge_values;
use crate::config::UnifiedConfig;

/// Fragment names, in the order they are emitted.
pub const FRAGMENT_ORDER: &[&str] = &[
    "ignores",
    "javascript",
    "typescript",
    "react",
    "react-hooks",
    "jsx-a11y",
    "imports",
    "static-analysis",
    "user-overrides",
];

const TYPESCRIPT_FILES: &[&str] = &["**/*.ts", "**/*.tsx", "**/*.mts", "**/*.cts"];
const JSX_FILES: &[&str] = &["**/*.jsx", "**/*.tsx"];

/// One block of the linter's flat configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFragment {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub language_options: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub rules: Map<String, Value>,
}

impl ConfigFragment {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            ignores: Vec::new(),
            plugins: Vec::new(),
            language_options: Map::new(),
            settings: Map::new(),
            rules: Map::new(),
        }
    }

    #[must_use]
    pub fn with_files(mut self, files: &[&str]) -> Self {
        self.files = files.iter().map(|f| f.to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_ignores(mut self, ignores: impl IntoIterator<Item = String>) -> Self {
        self.ignores = ignores.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugins.push(plugin.into());
        self
    }

    #[must_use]
    pub fn with_language_option(mut self, key: &str, value: Value) -> Self {
        self.language_options.insert(key.to_string(), value);
        self
    }

    #[must_use]
    pub fn with_setting(mut self, key: &str, value: Value) -> Self {
        self.settings.insert(key.to_string(), value);
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Map<String, Value>) -> Self {
        self.rules = rules;
        self
    }
}

/// The generated linter configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LintToolConfig {
    fragments: Vec<ConfigFragment>,
}

impl LintToolConfig {
    #[must_use]
    pub fn fragments(&self) -> &[ConfigFragment] {
        &self.fragments
    }

    /// Names of the emitted fragments, in order.
    #[must_use]
    pub fn fragment_names(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.name.as_str()).collect()
    }

    #[must_use]
    pub fn fragment(&self, name: &str) -> Option<&ConfigFragment> {
        self.fragments.iter().find(|f| f.name == name)
    }

    /// The rule table the linter ends up applying, folding fragments in order.
    ///
    /// On a key collision the later fragment wins. A rule setting is a tuple
    /// such as `["warn", 15]`, so array settings replace rather than union;
    /// object settings merge key by key.
    #[must_use]
    pub fn effective_rules(&self) -> Map<String, Value> {
        let mut rules = Map::new();
        for fragment in &self.fragments {
            for (rule, setting) in &fragment.rules {
                let merged = match (rules.get(rule), setting) {
                    (Some(existing @ Value::Object(_)), Value::Object(_)) => {
                        merge_values(existing, setting)
                    }
                    _ => setting.clone(),
                };
                rules.insert(rule.clone(), merged);
            }
        }
        rules
    }
}

fn rules(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn javascript_fragment() -> ConfigFragment {
    ConfigFragment::new("javascript").with_rules(rules(json!({
        "no-unused-vars": "warn",
        "no-undef": "error",
        "no-console": "warn",
        "no-debugger": "error",
        "no-var": "error",
        "prefer-const": "error",
        "eqeqeq": ["error", "always"],
        "no-unreachable": "error",
        "no-dupe-keys": "error",
        "no-self-compare": "error",
    })))
}

fn typescript_fragment() -> ConfigFragment {
    ConfigFragment::new("typescript")
        .with_files(TYPESCRIPT_FILES)
        .with_plugin("@typescript-eslint")
        .with_language_option("parser", json!("@typescript-eslint/parser"))
        .with_rules(rules(json!({
            "no-unused-vars": "off",
            "no-undef": "off",
            "@typescript-eslint/no-unused-vars": ["warn", {"argsIgnorePattern": "^_"}],
            "@typescript-eslint/no-explicit-any": "warn",
            "@typescript-eslint/consistent-type-imports": "warn",
        })))
}

fn react_fragment() -> ConfigFragment {
    ConfigFragment::new("react")
        .with_files(JSX_FILES)
        .with_plugin(Capability::React.rule_prefix())
        .with_setting("react", json!({"version": "detect"}))
        .with_rules(rules(json!({
            "react/jsx-key": "error",
            "react/no-unescaped-entities": "warn",
            "react/react-in-jsx-scope": "off",
            "react/prop-types": "off",
        })))
}

fn react_hooks_fragment() -> ConfigFragment {
    ConfigFragment::new("react-hooks")
        .with_files(JSX_FILES)
        .with_plugin(Capability::ReactHooks.rule_prefix())
        .with_rules(rules(json!({
            "react-hooks/rules-of-hooks": "error",
            "react-hooks/exhaustive-deps": "warn",
        })))
}

fn jsx_a11y_fragment() -> ConfigFragment {
    ConfigFragment::new("jsx-a11y")
        .with_files(JSX_FILES)
        .with_plugin(Capability::JsxA11y.rule_prefix())
        .with_rules(rules(json!({
            "jsx-a11y/alt-text": "error",
            "jsx-a11y/anchor-is-valid": "warn",
            "jsx-a11y/aria-props": "error",
        })))
}

fn imports_fragment() -> ConfigFragment {
    ConfigFragment::new("imports")
        .with_plugin(Capability::Imports.rule_prefix())
        .with_rules(rules(json!({
            "import/order": ["warn", {
                "groups": ["builtin", "external", "internal", "parent", "sibling", "index"],
                "newlines-between": "always",
                "alphabetize": {"order": "asc", "caseInsensitive": true}
            }],
            "import/no-duplicates": "error",
            "import/first": "error",
        })))
}

/// Add `fragment` if the plugin behind it is installed.
fn push_if_available(
    fragments: &mut Vec<ConfigFragment>,
    probe: &dyn PluginProbe,
    capability: Capability,
    fragment: impl FnOnce() -> ConfigFragment,
) {
    if probe.available(capability) {
        fragments.push(fragment());
    } else {
        debug!("{} not installed, omitting its rules", capability.package());
    }
}

/// Build the linter configuration for `config`.
///
/// Plugin-backed fragments are included only if their toggle is on and
/// `probe` finds the plugin. The `lint.enabled` flag is left to the caller.
#[must_use]
pub fn build(config: &UnifiedConfig, probe: &dyn PluginProbe) -> LintToolConfig {
    let lint = &config.lint;
    let mut fragments =
        vec![ConfigFragment::new("ignores").with_ignores(lint.ignore_patterns.iter().cloned())];

    if lint.javascript {
        fragments.push(javascript_fragment());
    }
    if lint.typescript {
        fragments.push(typescript_fragment());
    }
    if lint.react {
        push_if_available(&mut fragments, probe, Capability::React, react_fragment);
        push_if_available(&mut fragments, probe, Capability::ReactHooks, react_hooks_fragment);
        push_if_available(&mut fragments, probe, Capability::JsxA11y, jsx_a11y_fragment);
    }
    if lint.imports {
        push_if_available(&mut fragments, probe, Capability::Imports, imports_fragment);
    }
    if config.static_analysis.enabled {
        let static_rules = config.static_analysis.rules.clone();
        push_if_available(&mut fragments, probe, Capability::StaticAnalysis, || {
            ConfigFragment::new("static-analysis")
                .with_plugin(Capability::StaticAnalysis.rule_prefix())
                .with_rules(static_rules)
        });
    }

    fragments.push(ConfigFragment::new("user-overrides").with_rules(lint.rules.clone()));

    LintToolConfig { fragments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::capabilities::StaticProbe;

    fn react_config() -> UnifiedConfig {
        let mut config = UnifiedConfig::default();
        config.lint.react = true;
        config
    }

    #[test]
    fn test_default_fragments_without_plugins() {
        let built = build(&UnifiedConfig::default(), &StaticProbe::none());
        assert_eq!(
            built.fragment_names(),
            vec!["ignores", "javascript", "typescript", "user-overrides"]
        );
    }

    #[test]
    fn test_full_fragment_order() {
        let built = build(&react_config(), &StaticProbe::all());
        assert_eq!(built.fragment_names(), FRAGMENT_ORDER.to_vec());
    }

    #[test]
    fn test_ignores_come_first_with_patterns() {
        let built = build(&UnifiedConfig::default(), &StaticProbe::all());
        let first = &built.fragments()[0];
        assert_eq!(first.name, "ignores");
        assert!(first.ignores.contains(&"node_modules".to_string()));
        assert!(first.rules.is_empty());
    }

    #[test]
    fn test_language_toggles() {
        let mut config = UnifiedConfig::default();
        config.lint.javascript = false;
        let built = build(&config, &StaticProbe::none());
        assert!(built.fragment("javascript").is_none());
        assert!(built.fragment("typescript").is_some());
    }

    #[test]
    fn test_react_sub_blocks_probed_independently() {
        let probe = StaticProbe::with([Capability::React, Capability::JsxA11y]);
        let built = build(&react_config(), &probe);
        assert!(built.fragment("react").is_some());
        assert!(built.fragment("react-hooks").is_none());
        assert!(built.fragment("jsx-a11y").is_some());
    }

    #[test]
    fn test_react_toggle_off_ignores_probe() {
        let built = build(&UnifiedConfig::default(), &StaticProbe::all());
        assert!(built.fragment("react").is_none());
        assert!(built.fragment("react-hooks").is_none());
        assert!(built.fragment("jsx-a11y").is_none());
    }

    #[test]
    fn test_static_analysis_disabled() {
        let mut config = UnifiedConfig::default();
        config.static_analysis.enabled = false;
        let built = build(&config, &StaticProbe::all());
        assert!(built.fragment("static-analysis").is_none());
    }

    #[test]
    fn test_user_overrides_last_and_win() {
        let mut config = UnifiedConfig::default();
        config.lint.rules.insert("no-console".into(), json!("off"));
        config
            .lint
            .rules
            .insert("sonarjs/cognitive-complexity".into(), json!(["error", 25]));

        let built = build(&config, &StaticProbe::all());
        assert_eq!(
            built.fragments().last().map(|f| f.name.as_str()),
            Some("user-overrides")
        );

        let effective = built.effective_rules();
        assert_eq!(effective["no-console"], json!("off"));
        assert_eq!(effective["sonarjs/cognitive-complexity"], json!(["error", 25]));
    }

    #[test]
    fn test_later_language_fragment_wins() {
        let built = build(&UnifiedConfig::default(), &StaticProbe::none());
        let effective = built.effective_rules();
        assert_eq!(effective["no-unused-vars"], json!("off"));
        assert_eq!(effective["prefer-const"], json!("error"));
    }

    #[test]
    fn test_object_settings_merge() {
        let mut config = UnifiedConfig::default();
        config.lint.javascript = false;
        config.lint.typescript = false;
        config.static_analysis.rules = rules(json!({"custom/limit": {"max": 10, "skip": true}}));
        config.lint.rules = rules(json!({"custom/limit": {"max": 20}}));

        let effective = build(&config, &StaticProbe::all()).effective_rules();
        assert_eq!(effective["custom/limit"], json!({"max": 20, "skip": true}));
    }

    #[test]
    fn test_serializes_as_fragment_array() {
        let built = build(&UnifiedConfig::default(), &StaticProbe::none());
        let value = serde_json::to_value(&built).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array[0]["name"], json!("ignores"));
        assert!(array[0].get("rules").is_none());
        assert_eq!(
            array[2]["languageOptions"]["parser"],
            json!("@typescript-eslint/parser")
        );
    }
}
