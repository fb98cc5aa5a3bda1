//! Native configuration for the external tools.
//!
//! Each builder is a pure function of a [`UnifiedConfig`](crate::config::UnifiedConfig):
//!
//! - [`lint`] - Ordered linter fragments, gated on installed plugins
//! - [`format`] - Formatter options
//! - [`commit`] - Commit-message rules
//! - [`capabilities`] - Which optional linter plugins are installed

pub mod capabilities;
pub mod commit;
pub mod format;
pub mod lint;

pub use capabilities::{Capability, NodeModulesProbe, PluginProbe, StaticProbe};
pub use commit::CommitRuleSet;
pub use lint::{ConfigFragment, LintToolConfig};
