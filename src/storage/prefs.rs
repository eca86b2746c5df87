use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// A flat string key-value store for UI preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in a TOML file of plain `key = "value"` pairs.
///
/// The file is read on every access and rewritten on every write; it holds
/// a handful of entries at most.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location, <data_dir>/prefs.toml.
    pub fn open_default() -> Self {
        Self::new(crate::paths::prefs_file())
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences: {}", self.path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences: {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Write one entry. An unreadable file is replaced rather than left to
    /// block every later save.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable preferences: {e:#}");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let contents = toml::to_string(&entries).context("Failed to serialize preferences")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
