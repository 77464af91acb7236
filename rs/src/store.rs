//! Core DocStore implementation

use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A directory of JSON/text documents, one file per record
pub struct DocStore {
    /// Directory holding the documents
    dir: PathBuf,
}

impl DocStore {
    /// Open or create a document store at the given directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create store directory")?;
        debug!(?dir, "Opened document store");
        Ok(Self { dir })
    }

    /// Save a serializable value as pretty-printed JSON
    pub fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content).context(format!("Failed to write {}", path.display()))?;
        debug!(?path, "Saved document");
        Ok(())
    }

    /// Load a JSON document, returning None if it doesn't exist
    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&content).context(format!("Malformed JSON in {}", path.display()))?;
        Ok(Some(value))
    }

    /// Save raw text content
    pub fn save_text(&self, name: &str, content: &str) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, content).context(format!("Failed to write {}", path.display()))?;
        debug!(?path, "Saved document");
        Ok(())
    }

    /// Load raw text content, returning None if it doesn't exist
    pub fn load_text(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    /// Delete a document. Returns true if it existed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.dir.join(name);
        if path.exists() {
            fs::remove_file(&path).context(format!("Failed to delete {}", path.display()))?;
            debug!(?path, "Deleted document");
            return Ok(true);
        }
        Ok(false)
    }

    /// List document file names matching a prefix, `.json` files only
    pub fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && name.starts_with(prefix)
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load every JSON document matching a prefix
    ///
    /// Documents that fail to parse are skipped with a warning. A single
    /// corrupt file must not take down listings over the whole directory.
    pub fn load_all_json<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>> {
        let mut docs = Vec::new();
        for name in self.list(prefix)? {
            match self.load_json(&name) {
                Ok(Some(doc)) => docs.push(doc),
                Ok(None) => {}
                Err(e) => warn!(name, error = %e, "Skipping unreadable document"),
            }
        }
        Ok(docs)
    }
}

/// Recursively merge `updates` into `base`
///
/// Objects merge key-wise; any other value (including arrays) replaces the
/// existing one.
pub fn merge_json(base: &mut Value, updates: Value) {
    match (base, updates) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, updates) => *base = updates,
    }
}

/// Current time as an ISO-8601 UTC timestamp, for record metadata
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
