use std::{collections::{BTreeMap, HashMap}, fs, path::{Path, PathBuf}};

use tracing::{debug, warn};

use crate::error::AppError;

/// Storage file in the user's data directory
const STORAGE_FILE: &str = "storage.json";
/// Application directory under the platform data directory
const APP_DIR: &str = "ghfaves";

/// Durable string key-value slots, in the manner of browser `localStorage`
pub trait KeyValueStorage {
    /// Reads the value stored under `key`, `None` when the key is unset
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Overwrites the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }
}

/// Gets the default path to the storage file
pub fn get_default_storage_path() -> Result<PathBuf, AppError> {
    let data_dir: PathBuf = dirs::data_dir().ok_or_else(|| {
        AppError::Validation("failed to find the data directory".to_string())
    })?;
    Ok(data_dir.join(APP_DIR).join(STORAGE_FILE))
}

/// Key-value storage backed by a single JSON object on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every slot from the file
    ///
    /// An absent, empty, or unparseable file reads as no slots at all.
    fn read_slots(&self) -> Result<BTreeMap<String, String>, AppError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let file_contents: String = fs::read_to_string(&self.path)?;
        if file_contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&file_contents) {
            Ok(slots) => Ok(slots),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "storage file unreadable, ignoring contents");
                Ok(BTreeMap::new())
            }
        }
    }

    /// Writes every slot to a temp file and renames it over the storage file
    fn write_slots(&self, slots: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json: String = serde_json::to_string_pretty(slots)?;
        let tmp_path: PathBuf = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let mut slots = self.read_slots()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)?;
        debug!(path = %self.path.display(), key, bytes = value.len(), "storage slot written");
        Ok(())
    }
}

/// Key-value storage that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
