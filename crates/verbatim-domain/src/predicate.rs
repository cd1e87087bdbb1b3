//! The closed vocabulary of record filters

use serde::{Deserialize, Serialize};

/// A set of named filter predicates
///
/// Field order is the fixed evaluation order of the filter engine, and
/// absent predicates impose no constraint. Serializes as an object holding
/// only the predicates that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateSet {
    /// Exact match against `properties.is_palindrome`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    /// Inclusive lower bound on `properties.length`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Inclusive upper bound on `properties.length`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Exact match against `properties.word_count`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,

    /// Case-insensitive character containment, stored lower-cased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl PredicateSet {
    /// True when no predicate is present
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }
}
