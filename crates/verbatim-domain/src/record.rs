//! Record module - analyzed strings keyed by content hash

use crate::properties::{analyze, StringProperties};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Content-addressed record identifier
///
/// Always the lowercase hex SHA-256 digest of the record's value, so the
/// identifier of a candidate value can be recomputed without a store lookup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Compute the identifier for a value
    ///
    /// # Examples
    ///
    /// ```
    /// use verbatim_domain::RecordId;
    ///
    /// let id = RecordId::for_value("");
    /// assert_eq!(
    ///     id.as_str(),
    ///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    /// );
    /// ```
    pub fn for_value(value: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(value.as_bytes())))
    }

    /// Parse an identifier from its hex form
    ///
    /// Only 64 lowercase hex digits are accepted.
    pub fn parse(s: &str) -> Result<Self, String> {
        let valid = s.len() == 64
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("Invalid SHA-256 hex digest: {:?}", s))
        }
    }

    /// Borrow the hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// Canonical form of a submitted value
///
/// Leading and trailing whitespace is dropped before hashing, both on
/// creation and on lookup, so `" racecar "` and `"racecar"` share one record.
pub fn normalize_value(raw: &str) -> &str {
    raw.trim()
}

/// An analyzed string as persisted in the store
///
/// Records are immutable; there is no update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    /// SHA-256 digest of `value`
    pub id: RecordId,

    /// The stored value
    pub value: String,

    /// Properties computed at creation time
    pub properties: StringProperties,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyze `value` and build a record for it
    ///
    /// `value` is stored exactly as given; callers normalize first.
    pub fn new(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            id: RecordId::for_value(&value),
            value,
            properties,
            created_at,
        }
    }

    /// Check that the identifier and properties still describe the value
    pub fn verify(&self) -> Result<(), IntegrityError> {
        let expected = RecordId::for_value(&self.value);
        if self.id != expected {
            return Err(IntegrityError::IdMismatch {
                stored: self.id.clone(),
                computed: expected,
            });
        }

        if self.properties != analyze(&self.value) {
            return Err(IntegrityError::PropertiesMismatch(self.id.clone()));
        }

        Ok(())
    }
}

/// A stored record that no longer agrees with its own value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// The identifier is not the digest of the value
    #[error("record id {stored} does not match value digest {computed}")]
    IdMismatch {
        /// Identifier found on the record
        stored: RecordId,
        /// Digest of the record's value
        computed: RecordId,
    },

    /// The properties differ from a fresh analysis of the value
    #[error("record {0} has properties that do not match its value")]
    PropertiesMismatch(RecordId),
}
