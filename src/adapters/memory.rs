use crate::adapters::{decode_string_array, encode_string_array};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{Result, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory key-value store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with an arbitrary JSON value.
    pub fn with_value(self, key: impl Into<String>, value: Value) -> Self {
        if let Ok(mut data) = self.data.write() {
            data.insert(key.into(), value);
        }
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data
            .read()
            .map(|data| data.contains_key(key))
            .unwrap_or(false)
    }
}

impl KeyValueStore for MemoryStore {
    fn string_array(&self, key: &str) -> Result<Option<Vec<String>>> {
        let data = self.data.read().map_err(|_| StoreError::PoisonedError)?;
        data.get(key)
            .map(|value| decode_string_array(key, value))
            .transpose()
    }

    fn set_string_array(&self, key: &str, values: &[String]) -> Result<()> {
        let mut data = self.data.write().map_err(|_| StoreError::PoisonedError)?;
        data.insert(key.to_string(), encode_string_array(values));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut data = self.data.write().map_err(|_| StoreError::PoisonedError)?;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.string_array("missing").unwrap(), None);
    }

    #[test]
    fn test_set_then_read() {
        let store = MemoryStore::new();
        let values = vec!["cat-1".to_string(), "cat-2".to_string()];
        store.set_string_array("k", &values).unwrap();
        assert_eq!(store.string_array("k").unwrap(), Some(values));

        store.remove("k").unwrap();
        assert!(!store.contains_key("k"));
    }

    #[test]
    fn test_seeded_wrong_type() {
        let store = MemoryStore::new().with_value("k", json!(42));
        assert!(matches!(
            store.string_array("k"),
            Err(StoreError::TypeMismatchError { found, .. }) if found == "number"
        ));
    }
}
