//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Raw key-value persistence collaborator
///
/// Keys are record identifiers and values are serialized records. The store
/// gives no transactional guarantees beyond the atomicity of each single call.
///
/// Implemented by the infrastructure layer (verbatim-store)
pub trait KeyValueStore {
    /// Error type for store operations
    type Error;

    /// Fetch the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&mut self, key: &str) -> Result<(), Self::Error>;

    /// List every key currently in the store, in no particular order
    fn list_keys(&self) -> Result<Vec<String>, Self::Error>;
}
