//! Commit-message rules.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::UnifiedConfig;

/// What the commit-message checker reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRuleSet {
    pub extends: Vec<String>,
    pub rules: Map<String, Value>,
}

/// Copy the commit rules out of `config`. Whether they apply at all
/// (`commitRules.enabled`) is up to the caller.
#[must_use]
pub fn build(config: &UnifiedConfig) -> CommitRuleSet {
    CommitRuleSet {
        extends: config.commit_rules.extends.clone(),
        rules: config.commit_rules.rules.clone(),
    }
}
