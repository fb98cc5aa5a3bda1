//! Editor workspace settings derived from the unified configuration.
//!
//! Settings go into `.vscode/settings.json`. Keys the user already set
//! there are kept unless this module owns them.

use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{EndOfLine, UnifiedConfig};
use crate::error::{CodeguardError, Result};

/// Settings file, relative to the project root.
pub const SETTINGS_PATH: &str = ".vscode/settings.json";

const FORMATTER_EXTENSION: &str = "esbenp.prettier-vscode";

fn eol(end_of_line: EndOfLine) -> &'static str {
    match end_of_line {
        EndOfLine::Lf => "\n",
        EndOfLine::Crlf => "\r\n",
        EndOfLine::Cr | EndOfLine::Auto => "auto",
    }
}

/// Languages the linter should validate in the editor.
fn lint_languages(config: &UnifiedConfig) -> Vec<&'static str> {
    let lint = &config.lint;
    let mut languages = Vec::new();
    if lint.javascript {
        languages.push("javascript");
        if lint.react {
            languages.push("javascriptreact");
        }
    }
    if lint.typescript {
        languages.push("typescript");
        if lint.react {
            languages.push("typescriptreact");
        }
    }
    languages
}

/// Editor settings for `config`.
#[must_use]
pub fn editor_settings(config: &UnifiedConfig) -> Value {
    let mut settings = Map::new();

    if config.format.enabled {
        let format = &config.format;
        settings.insert("editor.formatOnSave".into(), json!(true));
        settings.insert("editor.defaultFormatter".into(), json!(FORMATTER_EXTENSION));
        settings.insert("editor.tabSize".into(), json!(format.tab_width));
        settings.insert("editor.insertSpaces".into(), json!(!format.use_tabs));
        settings.insert("editor.rulers".into(), json!([format.print_width]));
        settings.insert("files.eol".into(), json!(eol(format.end_of_line)));
    }

    if config.lint.enabled {
        settings.insert(
            "editor.codeActionsOnSave".into(),
            json!({"source.fixAll.eslint": "explicit"}),
        );
        settings.insert("eslint.validate".into(), json!(lint_languages(config)));
    }

    Value::Object(settings)
}

/// Write [`editor_settings`] into the project's settings file.
///
/// Each generated key replaces the stored value outright; other keys are
/// left as they are. Does nothing and returns `None` when `ide` is off.
///
/// # Errors
///
/// Returns an error if an existing settings file is not valid JSON or the
/// file cannot be written.
pub fn write_editor_settings(
    project_dir: &Path,
    config: &UnifiedConfig,
) -> Result<Option<PathBuf>> {
    if !config.ide {
        debug!("IDE integration disabled");
        return Ok(None);
    }

    let path = project_dir.join(SETTINGS_PATH);
    let existing = if path.is_file() {
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| CodeguardError::parse(path.clone(), "JSON", e.to_string()))?
    } else {
        Value::Object(Map::new())
    };

    let mut merged = match existing {
        Value::Object(map) => map,
        _ => {
            return Err(CodeguardError::parse(
                path,
                "JSON",
                "settings file is not a JSON object",
            ))
        }
    };
    if let Value::Object(generated) = editor_settings(config) {
        for (key, value) in generated {
            merged.insert(key, value);
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, format!("{}\n", serde_json::to_string_pretty(&merged)?))?;
    debug!("Wrote editor settings to {}", path.display());

    Ok(Some(path))
}
