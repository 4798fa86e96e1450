use crate::adapters::{decode_string_array, encode_string_array};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{Result, StoreError};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable key-value store kept as a single JSON object on disk.
///
/// Every write rewrites the whole document through a sibling `.tmp` file
/// followed by a rename. Keys this crate does not own are carried over
/// untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::IoError(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let bytes = serde_json::to_vec_pretty(document)?;
        let written = Self::write_synced(&tmp, &bytes).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            // 失敗時不留下暫存檔
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::IoError(e));
        }
        Ok(())
    }

    fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self.lock.lock().map_err(|_| StoreError::PoisonedError)?;
        let mut document = self.read_document()?;
        apply(&mut document);
        self.write_document(&document)
    }
}

impl KeyValueStore for JsonFileStore {
    fn string_array(&self, key: &str) -> Result<Option<Vec<String>>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::PoisonedError)?;
        let document = self.read_document()?;
        document
            .get(key)
            .map(|value| decode_string_array(key, value))
            .transpose()
    }

    fn set_string_array(&self, key: &str, values: &[String]) -> Result<()> {
        tracing::debug!("Writing {} values to '{}' in {}", values.len(), key, self.path.display());
        self.update(|document| {
            document.insert(key.to_string(), encode_string_array(values));
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|document| {
            document.remove(key);
        })
    }
}
