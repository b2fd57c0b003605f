//! Keyed persistence for in-progress report submissions
//!
//! A draft is the full placeholder map of one submission, stored as a flat
//! JSON object in its own file under the store's root directory. Records are
//! keyed by member code and template name; saving overwrites, deleting an
//! absent key is a no-op, and a record that exists but does not parse is
//! reported as corrupt rather than silently dropped.

pub mod error;

pub use error::DraftStoreError;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Identifier of a stored draft: `{member_code}_{template_base_name}`.
///
/// Two submissions that derive the same key overwrite each other; the key
/// scheme embeds the template name, so drafts for different template
/// variants never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftKey(String);

impl DraftKey {
    /// Derive the key for a submission from the member code and the selected
    /// template's file name. The template extension is stripped.
    pub fn derive(member_code: &str, template_file_name: &str) -> Self {
        let base = Path::new(template_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(template_file_name);
        DraftKey(format!("{}_{}", member_code, base))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DraftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DraftKey {
    fn from(raw: String) -> Self {
        DraftKey(raw)
    }
}

/// One submission's field values, keyed by placeholder name.
///
/// Values are plain strings; date fields are stored in day/month/year form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftRecord {
    pub fields: BTreeMap<String, String>,
}

impl DraftRecord {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Value stored for a field, or the empty string when absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }
}

impl FromIterator<(String, String)> for DraftRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Directory-backed store of draft records, one JSON file per key.
#[derive(Debug, Clone)]
pub struct DraftStore {
    root: PathBuf,
}

impl DraftStore {
    /// Open a store rooted at `root`, creating the directory if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, DraftStoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &DraftKey) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Persist `record` under `key`, replacing any previous record.
    pub fn save(&self, key: &DraftKey, record: &DraftRecord) -> Result<(), DraftStoreError> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_vec_pretty(record).map_err(DraftStoreError::Serialize)?;
        fs::write(self.record_path(key), json)?;
        info!("Saved draft {}", key);
        Ok(())
    }

    /// Load the record stored under `key`, or `None` when there is none.
    pub fn load(&self, key: &DraftKey) -> Result<Option<DraftRecord>, DraftStoreError> {
        let path = self.record_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_slice(&bytes).map_err(|source| DraftStoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(record))
    }

    /// Remove the record under `key`; removing an absent key is a no-op.
    pub fn delete(&self, key: &DraftKey) -> Result<(), DraftStoreError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => {
                info!("Deleted draft {}", key);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Keys of every stored record. Order follows the directory listing.
    pub fn list_keys(&self) -> Result<Vec<DraftKey>, DraftStoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(DraftKey(stem.to_string()));
            }
        }
        Ok(keys)
    }
}
