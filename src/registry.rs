use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A stored identifier and the generation parameters used for it.
///
/// Only parameters are persisted, never secrets. Optional fields are
/// omitted from the file when unset and preserved exactly when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub name: String,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphanumeric: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

/// The on-disk registry of known keys.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Registry {
    keys: Vec<KeyEntry>,
}

impl Registry {
    /// Load the registry from `path`. A missing file is an empty
    /// registry; an unreadable or malformed file is an error naming the
    /// path, never silently discarded data.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key registry at {}", path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse key registry at {}", path.display()))
    }

    /// Write the registry to `path` atomically: full new contents to a
    /// temp file in the same directory, then rename over the old file.
    pub fn store(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize registry")?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write key registry at {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace key registry at {}", path.display()))?;

        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&KeyEntry> {
        self.keys.iter().find(|entry| entry.name == name)
    }

    /// Insert or replace the entry with the same name.
    pub fn upsert(&mut self, entry: KeyEntry) {
        match self.keys.iter_mut().find(|e| e.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.keys.push(entry),
        }
    }

    /// Entries whose name contains any of the given terms.
    pub fn search(&self, terms: &[String]) -> Vec<&KeyEntry> {
        self.keys
            .iter()
            .filter(|entry| terms.iter().any(|term| entry.name.contains(term.as_str())))
            .collect()
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.keys
    }
}

/// Default registry location: `$HOME/.hpg/keys.json`.
pub fn default_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set; cannot locate the key registry")?;
    Ok(PathBuf::from(home).join(".hpg").join("keys.json"))
}
