//! Custom error types for codeguard.
//!
//! Missing or malformed user configuration never surfaces here: the loader
//! recovers from it. These errors cover the explicit APIs (loading a named
//! file, writing reports, installing hooks, writing editor settings).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for codeguard operations
#[derive(Error, Debug)]
pub enum CodeguardError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A configuration file could not be parsed
    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Missing required file
    #[error("Missing required file: {path}")]
    MissingFile { path: PathBuf },

    // =========================================================================
    // Hook Errors
    // =========================================================================
    /// Hook installation failed
    #[error("Hook '{name}' failed: {message}")]
    Hook { name: String, message: String },

    // =========================================================================
    // Tool Errors
    // =========================================================================
    /// Missing required tool
    #[error("Missing required tool: {tool}")]
    MissingTool { tool: String },

    /// Tool output could not be read as diagnostics
    #[error("Unreadable output from '{tool}': {message}")]
    ToolOutput { tool: String, message: String },

    // =========================================================================
    // Report Errors
    // =========================================================================
    /// Report rendering or writing failed
    #[error("Report error: {message}")]
    Report { message: String },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CodeguardError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create a parse error for a config file
    pub fn parse(path: PathBuf, format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path,
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a hook error
    pub fn hook(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }

    /// Create a tool output error
    pub fn tool_output(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolOutput {
            tool: tool.into(),
            message: message.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error can be recovered from by falling back to defaults
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::Parse { .. } | Self::MissingFile { .. }
        )
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingFile { .. } | Self::MissingTool { .. } => 6,
            Self::Config { .. } | Self::Parse { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for codeguard results
pub type Result<T> = std::result::Result<T, CodeguardError>;

/// Extension trait for converting foreign errors to CodeguardError
pub trait IntoCodeguardError<T> {
    fn into_hook_error(self, name: &str) -> Result<T>;
}

impl<T, E: Into<anyhow::Error>> IntoCodeguardError<T> for std::result::Result<T, E> {
    fn into_hook_error(self, name: &str) -> Result<T> {
        self.map_err(|e| CodeguardError::hook(name, e.into().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodeguardError::parse(PathBuf::from("codeguard.config.json"), "json", "EOF");
        assert!(err.to_string().contains("codeguard.config.json"));
        assert!(err.to_string().contains("json"));
        assert!(err.to_string().contains("EOF"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(CodeguardError::config_with_path("test", PathBuf::from("x")).is_recoverable());
        assert!(CodeguardError::parse(PathBuf::from("x"), "toml", "bad").is_recoverable());
        assert!(!CodeguardError::hook("pre-commit", "denied").is_recoverable());
        assert!(!CodeguardError::report("disk full").is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CodeguardError::config_with_path("test", PathBuf::from("x")).exit_code(),
            7
        );
        assert_eq!(
            CodeguardError::MissingTool {
                tool: "git".into()
            }
            .exit_code(),
            6
        );
        assert_eq!(CodeguardError::report("test").exit_code(), 1);
    }

    #[test]
    fn test_config_with_path() {
        let path = PathBuf::from("/test/.codeguardrc");
        let err = CodeguardError::config_with_path("failed to parse", path.clone());
        if let CodeguardError::Config {
            message,
            path: opt_path,
        } = err
        {
            assert_eq!(message, "failed to parse");
            assert_eq!(opt_path, Some(path));
        } else {
            panic!("Wrong error variant");
        }
    }

    #[test]
    fn test_hook_error() {
        let err = CodeguardError::hook("pre-commit", "permission denied");
        if let CodeguardError::Hook { name, message } = err {
            assert_eq!(name, "pre-commit");
            assert_eq!(message, "permission denied");
        } else {
            panic!("Wrong error variant");
        }
    }

    #[test]
    fn test_into_hook_error_trait() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        ));

        let converted = result.into_hook_error("pre-push");
        if let Err(CodeguardError::Hook { name, message }) = converted {
            assert_eq!(name, "pre-push");
            assert!(message.contains("read-only file system"));
        } else {
            panic!("Wrong error variant after conversion");
        }
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: CodeguardError = io_err.into();
        assert!(matches!(err, CodeguardError::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }
}
