//! Verbatim Storage Layer
//!
//! Key-value persistence for analyzed string records.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] implementations hold raw JSON documents keyed by record id:
//!   [`MemoryStore`] for tests and ephemeral runs, [`SqliteStore`] for durable storage
//! - [`RecordRepository`] is the typed adapter on top: it serializes records on write
//!   and deserializes and verifies them on read
//!
//! # Examples
//!
//! ```no_run
//! use verbatim_store::{RecordRepository, SqliteStore};
//!
//! let store = SqliteStore::new("verbatim.db").unwrap();
//! let repository = RecordRepository::new(Box::new(store));
//! // Repository is now ready for record operations
//! ```

#![warn(missing_docs)]

mod memory;
mod repository;
mod sqlite;

pub use memory::MemoryStore;
pub use repository::{BoxedStore, RecordRepository};
pub use sqlite::SqliteStore;
pub use verbatim_domain::traits::KeyValueStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored document does not describe a valid record
    #[error("Corrupt record under key {key}: {reason}")]
    Corrupt {
        /// Key the document was read from
        key: String,
        /// What failed validation
        reason: String,
    },
}
