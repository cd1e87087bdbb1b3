//! Verbatim Domain Layer
//!
//! Core types and pure functions for the Verbatim string analysis service.
//! Nothing in this crate performs I/O; persistence and transport live in
//! other crates and talk to the domain through the types and traits here.
//!
//! ## Key Concepts
//!
//! - **Record**: an analyzed string, keyed by the SHA-256 digest of its value
//! - **Properties**: the fixed set of values computed once by [`analyze`]
//! - **Predicate set**: the closed vocabulary of filters understood by the query engine
//! - **Key-value store**: the persistence collaborator, abstracted as a trait
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations live in `verbatim-store`
//! - Query evaluation lives in `verbatim-query`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod predicate;
pub mod properties;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use predicate::PredicateSet;
pub use properties::{analyze, StringProperties};
pub use record::{normalize_value, IntegrityError, RecordId, StringRecord};
