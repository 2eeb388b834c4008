//! Persisted user preferences (`~/.local/state/qdl/prefs.toml`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Derive the filename from the URL.
    pub auto_detect: bool,
    /// Pre-fill the URL from the clipboard when a session starts.
    pub auto_extract: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_detect: true,
            auto_extract: true,
        }
    }
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("qdl")?;
        Ok(Self::at(xdg_dirs.place_state_file("prefs.toml")?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file yields defaults.
    pub fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("read prefs: {}", self.path.display()))?;
        toml::from_str(&data).with_context(|| format!("parse prefs: {}", self.path.display()))
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(prefs)?)
            .with_context(|| format!("write prefs: {}", self.path.display()))?;
        tracing::debug!(?prefs, "saved preferences");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::at(dir.path().join("prefs.toml"));
        assert_eq!(
            store.load().unwrap(),
            Preferences {
                auto_detect: true,
                auto_extract: true
            }
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::at(dir.path().join("nested").join("prefs.toml"));
        store
            .save(&Preferences {
                auto_detect: false,
                auto_extract: true,
            })
            .unwrap();
        let loaded = store.load().unwrap();
        assert!(!loaded.auto_detect);
        assert!(loaded.auto_extract);
    }

    #[test]
    fn older_file_without_auto_extract_defaults_on() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "auto_detect = false\n").unwrap();
        let loaded = PrefsStore::at(path).load().unwrap();
        assert!(!loaded.auto_detect);
        assert!(loaded.auto_extract);
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "auto_detect = \"maybe\"").unwrap();
        assert!(PrefsStore::at(path).load().is_err());
    }
}
