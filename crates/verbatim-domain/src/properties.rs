//! String analysis - the properties computed for every submitted value
//!
//! All counts operate on Unicode scalar values (`char`), so `length`,
//! `unique_characters` and the frequency map always agree with each other.

use crate::record::RecordId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Properties derived from a string value
///
/// Computed once when a record is created and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of characters in the value
    pub length: usize,

    /// Whether the alphanumeric characters read the same backwards, ignoring case
    pub is_palindrome: bool,

    /// Number of distinct characters (case-sensitive, whitespace included)
    pub unique_characters: usize,

    /// Number of whitespace-delimited words
    pub word_count: usize,

    /// Lowercase hex SHA-256 digest of the value
    pub sha256_hash: String,

    /// Occurrence count per character, in first-occurrence order
    pub character_frequency_map: IndexMap<char, usize>,
}

/// Analyze a string value
///
/// Pure and total: every finite string, including the empty string, has
/// properties.
///
/// # Examples
///
/// ```
/// use verbatim_domain::analyze;
///
/// let props = analyze("Race, car!");
/// assert!(props.is_palindrome);
/// assert_eq!(props.word_count, 2);
/// assert_eq!(props.length, 10);
/// ```
pub fn analyze(value: &str) -> StringProperties {
    let character_frequency_map = character_frequency_map(value);

    StringProperties {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_characters(value),
        word_count: word_count(value),
        sha256_hash: RecordId::for_value(value).to_string(),
        character_frequency_map,
    }
}

/// Palindrome test over letters and digits only, case-insensitive
///
/// A value with no letters or digits is vacuously a palindrome.
pub fn is_palindrome(value: &str) -> bool {
    let normalized: Vec<char> = value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    normalized.iter().eq(normalized.iter().rev())
}

/// Count of distinct characters in the unmodified value
pub fn unique_characters(value: &str) -> usize {
    value.chars().collect::<HashSet<_>>().len()
}

/// Count of maximal runs of non-whitespace characters
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// Single-pass character histogram preserving first-occurrence order
pub fn character_frequency_map(value: &str) -> IndexMap<char, usize> {
    let mut frequencies = IndexMap::new();
    for c in value.chars() {
        *frequencies.entry(c).or_insert(0) += 1;
    }
    frequencies
}
