//! Optional linter plugins and how their presence is detected.
//!
//! Rule blocks that need a plugin are only emitted when a [`PluginProbe`]
//! reports the plugin as installed.
//!
//! ```text
//! ┌──────────────────┐
//! │   PluginProbe    │
//! │  - available()   │
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────────────┐
//!    ▼                    ▼
//! NodeModulesProbe    StaticProbe
//! (node_modules/)     (fixed set)
//! ```

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A linter plugin that some rule blocks depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    React,
    ReactHooks,
    JsxA11y,
    Imports,
    StaticAnalysis,
}

impl Capability {
    /// Every capability, in fragment order.
    pub const ALL: [Capability; 5] = [
        Self::React,
        Self::ReactHooks,
        Self::JsxA11y,
        Self::Imports,
        Self::StaticAnalysis,
    ];

    /// npm package that provides the plugin.
    #[must_use]
    pub fn package(&self) -> &'static str {
        match self {
            Self::React => "eslint-plugin-react",
            Self::ReactHooks => "eslint-plugin-react-hooks",
            Self::JsxA11y => "eslint-plugin-jsx-a11y",
            Self::Imports => "eslint-plugin-import",
            Self::StaticAnalysis => "eslint-plugin-sonarjs",
        }
    }

    /// Plugin prefix used in rule names, e.g. `react-hooks/rules-of-hooks`.
    #[must_use]
    pub fn rule_prefix(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::ReactHooks => "react-hooks",
            Self::JsxA11y => "jsx-a11y",
            Self::Imports => "import",
            Self::StaticAnalysis => "sonarjs",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.package())
    }
}

/// Answers whether an optional plugin can be loaded.
pub trait PluginProbe {
    /// True if the plugin for `capability` is installed.
    fn available(&self, capability: Capability) -> bool;
}

/// Looks for installed packages under `node_modules`, walking up from the
/// project directory the way the package resolver does.
#[derive(Debug, Clone)]
pub struct NodeModulesProbe {
    project_dir: PathBuf,
}

impl NodeModulesProbe {
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    fn manifest_in(dir: &Path, capability: Capability) -> PathBuf {
        dir.join("node_modules")
            .join(capability.package())
            .join("package.json")
    }
}

impl PluginProbe for NodeModulesProbe {
    fn available(&self, capability: Capability) -> bool {
        self.project_dir
            .ancestors()
            .any(|dir| Self::manifest_in(dir, capability).is_file())
    }
}

/// A fixed answer set.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    installed: BTreeSet<Capability>,
}

impl StaticProbe {
    /// Nothing installed.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Every plugin installed.
    #[must_use]
    pub fn all() -> Self {
        Self::with(Capability::ALL)
    }

    /// Exactly the given plugins installed.
    #[must_use]
    pub fn with(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            installed: capabilities.into_iter().collect(),
        }
    }
}

impl PluginProbe for StaticProbe {
    fn available(&self, capability: Capability) -> bool {
        self.installed.contains(&capability)
    }
}
