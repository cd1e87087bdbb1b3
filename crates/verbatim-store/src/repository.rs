//! Typed record adapter over a raw key-value store

use crate::StoreError;
use tracing::{debug, error};
use verbatim_domain::traits::KeyValueStore;
use verbatim_domain::{RecordId, StringRecord};

/// Any key-value backend that reports [`StoreError`]
pub type BoxedStore = Box<dyn KeyValueStore<Error = StoreError> + Send>;

/// Record store adapter
///
/// A thin pass-through that adds only (de)serialization and validation.
/// Every document read back is checked against its key and its own value;
/// a mismatch is reported as [`StoreError::Corrupt`] rather than returned.
pub struct RecordRepository {
    store: BoxedStore,
}

impl RecordRepository {
    /// Wrap a key-value backend
    pub fn new(store: BoxedStore) -> Self {
        Self { store }
    }

    /// Fetch a record by id
    pub fn get(&self, id: &RecordId) -> Result<Option<StringRecord>, StoreError> {
        match self.store.get(id.as_str())? {
            Some(document) => decode(id.as_str(), &document).map(Some),
            None => Ok(None),
        }
    }

    /// Store a record under its own id
    pub fn put(&mut self, record: &StringRecord) -> Result<(), StoreError> {
        let document = serde_json::to_string(record)?;
        self.store.put(record.id.as_str(), &document)?;
        debug!(id = %record.id, "stored record");
        Ok(())
    }

    /// Remove a record by id
    pub fn delete(&mut self, id: &RecordId) -> Result<(), StoreError> {
        self.store.delete(id.as_str())?;
        debug!(%id, "deleted record");
        Ok(())
    }

    /// Materialize every stored record, in no particular order
    ///
    /// Keys that vanish between listing and reading are skipped.
    pub fn list_all(&self) -> Result<Vec<StringRecord>, StoreError> {
        let keys = self.store.list_keys()?;
        let mut records = Vec::with_capacity(keys.len());

        for key in keys {
            if let Some(document) = self.store.get(&key)? {
                records.push(decode(&key, &document)?);
            }
        }

        Ok(records)
    }

    /// Number of keys in the backend
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.store.list_keys()?.len())
    }
}

/// Deserialize and validate a stored document, failing closed
fn decode(key: &str, document: &str) -> Result<StringRecord, StoreError> {
    let record: StringRecord = serde_json::from_str(document).map_err(|e| {
        error!(key, error = %e, "stored document is not a record");
        StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })?;

    if record.id.as_str() != key {
        error!(key, id = %record.id, "record stored under foreign key");
        return Err(StoreError::Corrupt {
            key: key.to_string(),
            reason: format!("record id {} does not match key", record.id),
        });
    }

    record.verify().map_err(|e| {
        error!(key, error = %e, "record failed integrity check");
        StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(record)
}
