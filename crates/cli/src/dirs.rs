//! Platform-specific directory utilities
//!
//! Follows platform conventions for config and cache directories.

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_NAME: &str = "content-export";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Directory holding the preference store
///
/// - macOS: `~/Library/Application Support/content-export`
/// - Linux: `~/.config/content-export` (or `$XDG_CONFIG_HOME/content-export`)
/// - Windows: `%APPDATA%\content-export\config`
/// - Fallback: `./.content-export`
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_NAME}")))
}

/// Directory holding export logs
///
/// - macOS: `~/Library/Caches/content-export/logs`
/// - Linux: `~/.cache/content-export/logs` (or `$XDG_CACHE_HOME/content-export/logs`)
/// - Windows: `%LOCALAPPDATA%\content-export\cache\logs`
/// - Fallback: `<tmp>/content-export/logs`
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME))
        .join("logs")
}
