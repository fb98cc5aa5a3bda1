//! Git hook installation.
//!
//! Each entry of the `hooks` section becomes an executable script in
//! `.git/hooks`. Scripts written here carry a marker line, so a later
//! install can tell its own hooks apart from ones the user wrote by hand
//! and only replaces the latter when forced.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::{CodeguardError, IntoCodeguardError, Result};

/// Client-side hook names git runs.
pub const GIT_HOOK_NAMES: &[&str] = &[
    "applypatch-msg",
    "pre-applypatch",
    "post-applypatch",
    "pre-commit",
    "pre-merge-commit",
    "prepare-commit-msg",
    "commit-msg",
    "post-commit",
    "pre-rebase",
    "post-checkout",
    "post-merge",
    "pre-push",
    "pre-auto-gc",
    "post-rewrite",
    "sendemail-validate",
    "fsmonitor-watchman",
    "post-index-change",
];

/// Marker line identifying scripts this tool manages.
pub const MANAGED_MARKER: &str = "# managed by codeguard";

/// Outcome of [`install_hooks`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HookInstallReport {
    /// Hooks written.
    pub installed: Vec<String>,
    /// Hooks left alone because a hand-written script was already there.
    pub skipped: Vec<String>,
    /// Set when there is no `.git/hooks` directory to install into.
    pub missing_hooks_dir: Option<PathBuf>,
}

impl HookInstallReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.missing_hooks_dir.is_none()
    }
}

/// The script installed for `name`.
#[must_use]
pub fn render_hook_script(name: &str, command: &str) -> String {
    format!(
        "#!/bin/sh\n{MANAGED_MARKER} ({name})\n\
         # Edit the `hooks` section of the codeguard config instead of this file.\n\n\
         {command}\n"
    )
}

/// True if the script at `path` was written by [`install_hooks`].
#[must_use]
pub fn is_managed(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.lines().any(|line| line.starts_with(MANAGED_MARKER)))
        .unwrap_or(false)
}

/// Write every hook into `<project_dir>/.git/hooks`.
///
/// Existing scripts are replaced if they are managed or `force` is set, and
/// skipped otherwise. A project without `.git/hooks` is reported in the
/// result rather than treated as an error.
///
/// # Errors
///
/// Returns an error, before anything is written, if a name is not a git hook.
/// Also fails if a script cannot be written or made executable.
pub fn install_hooks(
    project_dir: &Path,
    hooks: &BTreeMap<String, String>,
    force: bool,
) -> Result<HookInstallReport> {
    if let Some(bad) = hooks
        .keys()
        .find(|name| !GIT_HOOK_NAMES.contains(&name.as_str()))
    {
        return Err(CodeguardError::hook(bad, "not a git hook name"));
    }

    let hooks_dir = project_dir.join(".git").join("hooks");
    let mut report = HookInstallReport::default();

    if !hooks_dir.is_dir() {
        warn!(
            "Git hooks directory not found (not a git repo?): {}",
            hooks_dir.display()
        );
        report.missing_hooks_dir = Some(hooks_dir);
        return Ok(report);
    }

    for (name, command) in hooks {
        let path = hooks_dir.join(name);
        if path.exists() && !force && !is_managed(&path) {
            debug!("Keeping existing hook {}", path.display());
            report.skipped.push(name.clone());
            continue;
        }

        write_executable(&path, &render_hook_script(name, command)).into_hook_error(name)?;
        debug!("Installed hook {}", path.display());
        report.installed.push(name.clone());
    }

    Ok(report)
}

fn write_executable(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)?;
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git/hooks")).unwrap();
        temp
    }

    fn hooks() -> BTreeMap<String, String> {
        crate::config::defaults::hooks()
    }

    #[test]
    fn test_render_hook_script() {
        let script = render_hook_script("pre-commit", "npx --no-install lint-staged");
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(MANAGED_MARKER));
        assert!(script.trim_end().ends_with("npx --no-install lint-staged"));
    }

    #[test]
    fn test_install_default_hooks() {
        let temp = git_project();
        let report = install_hooks(temp.path(), &hooks(), false).unwrap();

        assert_eq!(report.installed, vec!["commit-msg", "pre-commit"]);
        assert!(report.is_complete());

        let script = fs::read_to_string(temp.path().join(".git/hooks/commit-msg")).unwrap();
        assert!(script.contains("commitlint --edit \"$1\""));
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_hook_is_executable() {
        let temp = git_project();
        install_hooks(temp.path(), &hooks(), false).unwrap();
        let mode = fs::metadata(temp.path().join(".git/hooks/pre-commit"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_hand_written_hook_is_skipped() {
        let temp = git_project();
        let custom = temp.path().join(".git/hooks/pre-commit");
        fs::write(&custom, "#!/bin/sh\nmake check\n").unwrap();

        let report = install_hooks(temp.path(), &hooks(), false).unwrap();
        assert_eq!(report.skipped, vec!["pre-commit"]);
        assert_eq!(report.installed, vec!["commit-msg"]);
        assert!(!report.is_complete());
        assert_eq!(fs::read_to_string(&custom).unwrap(), "#!/bin/sh\nmake check\n");
    }

    #[test]
    fn test_force_replaces_hand_written_hook() {
        let temp = git_project();
        let custom = temp.path().join(".git/hooks/pre-commit");
        fs::write(&custom, "#!/bin/sh\nmake check\n").unwrap();

        let report = install_hooks(temp.path(), &hooks(), true).unwrap();
        assert!(report.skipped.is_empty());
        assert!(is_managed(&custom));
    }

    #[test]
    fn test_managed_hook_is_updated() {
        let temp = git_project();
        install_hooks(temp.path(), &hooks(), false).unwrap();

        let mut changed = hooks();
        changed.insert("pre-commit".into(), "npm test".into());
        let report = install_hooks(temp.path(), &changed, false).unwrap();

        assert!(report.skipped.is_empty());
        let script = fs::read_to_string(temp.path().join(".git/hooks/pre-commit")).unwrap();
        assert!(script.contains("npm test"));
    }

    #[test]
    fn test_missing_hooks_dir_is_reported() {
        let temp = TempDir::new().unwrap();
        let report = install_hooks(temp.path(), &hooks(), false).unwrap();
        assert!(report.installed.is_empty());
        assert_eq!(
            report.missing_hooks_dir,
            Some(temp.path().join(".git").join("hooks"))
        );
    }

    #[test]
    fn test_unknown_hook_name_is_an_error() {
        let temp = git_project();
        let bad = BTreeMap::from([("pre-lunch".to_string(), "true".to_string())]);
        let err = install_hooks(temp.path(), &bad, false).unwrap_err();
        assert!(matches!(err, CodeguardError::Hook { .. }));
    }

    #[test]
    fn test_unknown_hook_name_writes_nothing() {
        let temp = git_project();
        let mut with_bad = hooks();
        with_bad.insert("zz-not-a-hook".into(), "true".into());

        assert!(install_hooks(temp.path(), &with_bad, false).is_err());
        let written: Vec<_> = fs::read_dir(temp.path().join(".git/hooks"))
            .unwrap()
            .collect();
        assert!(written.is_empty());
    }
}
