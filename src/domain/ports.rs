use crate::utils::error::Result;
use std::sync::Arc;

/// Named-slot storage holding string arrays, in the shape of a platform
/// preferences store.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    fn string_array(&self, key: &str) -> Result<Option<Vec<String>>>;
    fn set_string_array(&self, key: &str, values: &[String]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn string_array(&self, key: &str) -> Result<Option<Vec<String>>> {
        (**self).string_array(key)
    }

    fn set_string_array(&self, key: &str, values: &[String]) -> Result<()> {
        (**self).set_string_array(key, values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
