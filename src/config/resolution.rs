//! Configuration discovery, loading and caching.
//!
//! A project is configured by the first file found from a fixed list of
//! candidates, searched in the working directory and then in each ancestor:
//!
//! 1. `codeguard.config.json`
//! 2. `codeguard.config.toml`
//! 3. `.codeguardrc` (JSON)
//! 4. `.codeguardrc.json`
//! 5. `.codeguardrc.toml`
//! 6. `package.json`, only if it has a `"codeguard"` key
//!
//! If the walk finds nothing, the user-level file
//! `{config_dir}/codeguard/config.json` is tried last.
//!
//! The file is deep-merged onto the built-in defaults. A missing or broken
//! file never fails the load: [`ConfigLoader::load`] logs the problem and
//! returns the defaults.
//!
//! # Example
//!
//! ```rust,ignore
//! use codeguard::config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new(Path::new("."));
//! let config = loader.load();
//! println!("tab width: {}", config.format.tab_width);
//!
//! // Same instance until the cache is reset
//! assert!(std::sync::Arc::ptr_eq(&config, &loader.load()));
//! loader.reset_cache();
//! ```

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::{defaults, merge, UnifiedConfig, TOOL_NAME};
use crate::error::{CodeguardError, Result};

// ============================================================================
// Config Format
// ============================================================================

/// Syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    /// The `codeguard` key of a `package.json`.
    PackageJson,
}

impl ConfigFormat {
    /// Infer the format from a file name.
    ///
    /// Files without a recognised extension (such as `.codeguardrc`) are JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if file_name == "package.json" {
            return Self::PackageJson;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Parse file content into a raw configuration tree.
    ///
    /// Returns `Ok(None)` for a `package.json` without a `codeguard` key.
    ///
    /// # Errors
    ///
    /// Returns a parse error naming `path` if the content is not valid.
    pub fn parse(&self, path: &Path, content: &str) -> Result<Option<Value>> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map(Some)
                .map_err(|e| CodeguardError::parse(path.to_path_buf(), "json", e.to_string())),
            Self::Toml => toml::from_str::<Value>(content)
                .map(Some)
                .map_err(|e| CodeguardError::parse(path.to_path_buf(), "toml", e.to_string())),
            Self::PackageJson => {
                let manifest: Value = serde_json::from_str(content).map_err(|e| {
                    CodeguardError::parse(path.to_path_buf(), "package.json", e.to_string())
                })?;
                Ok(manifest.get(TOOL_NAME).cloned())
            }
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
            Self::PackageJson => write!(f, "package.json"),
        }
    }
}

/// Candidate file names, in search order.
pub const CONFIG_CANDIDATES: &[&str] = &[
    "codeguard.config.json",
    "codeguard.config.toml",
    ".codeguardrc",
    ".codeguardrc.json",
    ".codeguardrc.toml",
    "package.json",
];

// ============================================================================
// Config Source
// ============================================================================

/// A configuration file that was found, with its raw content.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSource {
    /// Path to the config file.
    pub path: PathBuf,
    /// How the file was parsed.
    pub format: ConfigFormat,
    /// Parsed content before merging with defaults.
    pub raw: Value,
}

// ============================================================================
// Config Loader
// ============================================================================

/// Resolves the unified configuration once and hands out the cached result.
///
/// The loader is the only holder of resolved state. It is `Send + Sync`; two
/// threads racing on the first [`load`](Self::load) may both resolve, and the
/// cache only ever receives a complete value.
#[derive(Debug)]
pub struct ConfigLoader {
    working_dir: PathBuf,
    user_config_path: Option<PathBuf>,
    cache: RwLock<Option<Arc<UnifiedConfig>>>,
}

impl ConfigLoader {
    /// Create a loader searching from `working_dir`.
    #[must_use]
    pub fn new(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            user_config_path: Self::default_user_path(),
            cache: RwLock::new(None),
        }
    }

    /// Get the default user config path using the platform's config directory.
    #[must_use]
    pub fn default_user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(TOOL_NAME).join("config.json"))
    }

    /// Set or clear the user-level fallback config path.
    #[must_use]
    pub fn with_user_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.user_config_path = path;
        self
    }

    /// Get the directory the search starts from.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Get the user-level fallback config path.
    #[must_use]
    pub fn user_config_path(&self) -> Option<&PathBuf> {
        self.user_config_path.as_ref()
    }

    /// Resolve the configuration, or return the cached one.
    ///
    /// Never fails: any discovery or parse problem is logged and the
    /// defaults are used instead.
    pub fn load(&self) -> Arc<UnifiedConfig> {
        if let Some(cached) = self.cached() {
            return cached;
        }

        let resolved = Arc::new(self.resolve_or_default());

        match self.cache.write() {
            Ok(mut slot) => match slot.as_ref() {
                // Another caller won the race; hand out its value.
                Some(existing) => Arc::clone(existing),
                None => {
                    *slot = Some(Arc::clone(&resolved));
                    resolved
                }
            },
            Err(_) => resolved,
        }
    }

    /// Drop the cached configuration so the next [`load`](Self::load)
    /// re-reads from disk.
    pub fn reset_cache(&self) {
        if let Ok(mut slot) = self.cache.write() {
            *slot = None;
        }
    }

    /// Whether a resolved configuration is cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cached().is_some()
    }

    fn cached(&self) -> Option<Arc<UnifiedConfig>> {
        self.cache.read().ok().and_then(|slot| slot.clone())
    }

    /// Collapse [`try_load`](Self::try_load) to the defaults on any failure.
    fn resolve_or_default(&self) -> UnifiedConfig {
        match self.try_load() {
            Ok(Some((source, config))) => {
                tracing::debug!("Loaded config from {}", source.path.display());
                config
            }
            Ok(None) => {
                tracing::debug!(
                    "No config found from {}; using defaults",
                    self.working_dir.display()
                );
                defaults::default_config()
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!("{}; using defaults", e);
                defaults::default_config()
            }
            Err(e) => {
                tracing::error!("Cannot read config: {}; using defaults", e);
                defaults::default_config()
            }
        }
    }

    /// Resolve the configuration without the cache and without fallback.
    ///
    /// Returns `Ok(None)` if no config file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovered file cannot be read or parsed, or
    /// if its merged content does not fit the schema.
    pub fn try_load(&self) -> Result<Option<(ConfigSource, UnifiedConfig)>> {
        let Some(source) = self.locate()? else {
            return Ok(None);
        };
        let config = resolve_onto_defaults(&source.raw).map_err(|e| {
            CodeguardError::config_with_path(e.to_string(), source.path.clone())
        })?;
        Ok(Some((source, config)))
    }

    /// Find the first config file, ignoring read or parse problems.
    #[must_use]
    pub fn discover(&self) -> Option<ConfigSource> {
        self.locate().ok().flatten()
    }

    /// List every path the search would check, in order.
    #[must_use]
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .working_dir
            .ancestors()
            .flat_map(|dir| CONFIG_CANDIDATES.iter().map(move |name| dir.join(name)))
            .collect();
        if let Some(user) = &self.user_config_path {
            paths.push(user.clone());
        }
        paths
    }

    /// Find the first config file along the search path.
    ///
    /// # Errors
    ///
    /// Returns an error if the first file found cannot be read or parsed.
    pub fn locate(&self) -> Result<Option<ConfigSource>> {
        for path in self.search_paths() {
            if !path.is_file() {
                continue;
            }
            let format = ConfigFormat::from_path(&path);
            let content = std::fs::read_to_string(&path)?;
            if let Some(raw) = format.parse(&path, &content)? {
                return Ok(Some(ConfigSource { path, format, raw }));
            }
            // package.json without our key: keep searching
        }
        Ok(None)
    }

    /// Load one file onto the defaults, bypassing the search and the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, unparseable, or
    /// does not fit the schema. Unlike [`load`](Self::load), nothing is
    /// swallowed.
    pub fn load_file(path: &Path) -> Result<UnifiedConfig> {
        if !path.is_file() {
            return Err(CodeguardError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let format = ConfigFormat::from_path(path);
        let content = std::fs::read_to_string(path)?;
        let raw = format.parse(path, &content)?.ok_or_else(|| {
            CodeguardError::config_with_path(
                format!("no \"{}\" key in package.json", TOOL_NAME),
                path.to_path_buf(),
            )
        })?;
        resolve_onto_defaults(&raw)
            .map_err(|e| CodeguardError::config_with_path(e.to_string(), path.to_path_buf()))
    }
}

/// Merge a raw user tree onto the defaults and deserialize the result.
///
/// # Errors
///
/// Returns an error if the merged tree does not match the schema.
pub fn resolve_onto_defaults(raw: &Value) -> Result<UnifiedConfig> {
    let base = defaults::default_value()?;
    let merged = merge::merge_values(&base, raw);
    Ok(serde_json::from_value(merged)?)
}

// ============================================================================
// Tests
// ============================================================================
