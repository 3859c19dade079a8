//! Persisted user preferences.
//!
//! A small TOML file in the platform config directory. The only setting is
//! the export output root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::dirs;

const FILE_NAME: &str = "preferences.toml";

/// Output root used until one is configured.
pub const DEFAULT_OUTPUT_ROOT: &str = "lua";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub output_root: Option<PathBuf>,
}

/// Settable preference keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrefKey {
    OutputRoot,
}

pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl PreferenceStore {
    pub fn default_path() -> PathBuf {
        dirs::config_dir().join(FILE_NAME)
    }

    /// Loads the store at `path`; a missing file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let prefs = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("Failed to parse preferences {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read preferences {}", path.display()));
            }
        };
        Ok(Self { path, prefs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn output_root(&self) -> PathBuf {
        self.prefs
            .output_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT))
    }

    pub fn get(&self, key: PrefKey) -> String {
        match key {
            PrefKey::OutputRoot => self.output_root().display().to_string(),
        }
    }

    pub fn set(&mut self, key: PrefKey, value: &str) -> Result<()> {
        match key {
            PrefKey::OutputRoot => {
                if value.trim().is_empty() {
                    anyhow::bail!("output-root cannot be empty");
                }
                self.prefs.output_root = Some(PathBuf::from(value));
            }
        }
        Ok(())
    }

    /// Writes the store through a temp file and rename.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(&self.prefs).context("Failed to encode preferences")?;
        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_store_uses_default_output_root() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::open(dir.path().join("preferences.toml")).unwrap();
        assert_eq!(store.output_root(), PathBuf::from(DEFAULT_OUTPUT_ROOT));
    }

    #[test]
    fn test_set_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = PreferenceStore::open(&path).unwrap();
        store.set(PrefKey::OutputRoot, "Assets/Lua/Config").unwrap();
        store.save().unwrap();

        assert_eq!(store.path(), path.as_path());

        let reopened = PreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get(PrefKey::OutputRoot), "Assets/Lua/Config");
        assert!(fs::read_to_string(&path).unwrap().contains("output_root"));
    }

    #[test]
    fn test_empty_output_root_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = PreferenceStore::open(dir.path().join("p.toml")).unwrap();
        assert!(store.set(PrefKey::OutputRoot, "  ").is_err());
    }

    #[test]
    fn test_malformed_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "output_root = [").unwrap();
        assert!(PreferenceStore::open(&path).is_err());
    }
}
