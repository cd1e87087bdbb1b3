//! In-memory key-value store

use crate::StoreError;
use std::collections::HashMap;
use verbatim_domain::traits::KeyValueStore;

/// HashMap-backed store
///
/// Contents are lost when the store is dropped. Used by tests and by the
/// `memory` storage backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.put("k", "v1").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v1"));

        store.put("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.list_keys().unwrap(), vec!["k".to_string()]);

        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        // Deleting an absent key is a no-op
        store.delete("k").unwrap();
        assert!(store.list_keys().unwrap().is_empty());
    }
}
