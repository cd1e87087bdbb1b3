//! Structured filter engine

use verbatim_domain::{PredicateSet, StringRecord};

/// Result of applying a predicate set
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Records satisfying every predicate, in input order
    pub data: Vec<StringRecord>,

    /// The predicates that were applied, in canonical form
    pub applied: PredicateSet,
}

/// Keep the records that satisfy every present predicate
///
/// Composition is conjunctive and the filter is stable: surviving records
/// keep their relative input order. An empty predicate set returns the
/// input unchanged.
pub fn apply_filters(records: Vec<StringRecord>, predicates: &PredicateSet) -> FilterOutcome {
    let applied = canonicalize(predicates);
    let data = records
        .into_iter()
        .filter(|record| matches(record, &applied))
        .collect();

    FilterOutcome { data, applied }
}

/// Evaluate a predicate set against one record
///
/// Predicates are checked in the fixed order `is_palindrome`, `min_length`,
/// `max_length`, `word_count`, `contains_character`.
pub fn matches(record: &StringRecord, predicates: &PredicateSet) -> bool {
    let props = &record.properties;

    if let Some(wanted) = predicates.is_palindrome {
        if props.is_palindrome != wanted {
            return false;
        }
    }

    if let Some(min) = predicates.min_length {
        if props.length < min {
            return false;
        }
    }

    if let Some(max) = predicates.max_length {
        if props.length > max {
            return false;
        }
    }

    if let Some(count) = predicates.word_count {
        if props.word_count != count {
            return false;
        }
    }

    if let Some(c) = predicates.contains_character {
        let needle = fold_case(c);
        if !record.value.chars().any(|v| fold_case(v) == needle) {
            return false;
        }
    }

    true
}

/// Lower-case a character when it lower-cases to exactly one character
///
/// Characters whose lowercase form expands (e.g. `'İ'`) are kept as-is.
pub(crate) fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn canonicalize(predicates: &PredicateSet) -> PredicateSet {
    PredicateSet {
        contains_character: predicates.contains_character.map(fold_case),
        ..predicates.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn records(values: &[&str]) -> Vec<StringRecord> {
        values
            .iter()
            .map(|v| StringRecord::new(*v, Utc::now()))
            .collect()
    }

    fn values(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.data.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn test_no_predicates_is_identity() {
        let input = records(&["zeta", "alpha", "racecar"]);
        let outcome = apply_filters(input.clone(), &PredicateSet::default());

        assert_eq!(outcome.data, input);
        assert!(outcome.applied.is_empty());
    }

    #[test]
    fn test_exact_length_window() {
        let input = records(&["four", "fives", "sixsix", "seven", "a"]);
        let predicates = PredicateSet {
            min_length: Some(5),
            max_length: Some(5),
            ..Default::default()
        };

        let outcome = apply_filters(input, &predicates);
        assert_eq!(values(&outcome), vec!["fives", "seven"]);
    }

    #[test]
    fn test_palindrome_and_word_count() {
        let input = records(&["racecar", "never odd or even", "level", "hello"]);
        let predicates = PredicateSet {
            is_palindrome: Some(true),
            word_count: Some(1),
            ..Default::default()
        };

        let outcome = apply_filters(input, &predicates);
        assert_eq!(values(&outcome), vec!["racecar", "level"]);
    }

    #[test]
    fn test_non_palindromes() {
        let input = records(&["racecar", "hello"]);
        let predicates = PredicateSet {
            is_palindrome: Some(false),
            ..Default::default()
        };

        assert_eq!(values(&apply_filters(input, &predicates)), vec!["hello"]);
    }

    #[test]
    fn test_contains_character_ignores_case() {
        let input = records(&["Zebra", "apple", "fizz", "BUZZ"]);
        let predicates = PredicateSet {
            contains_character: Some('Z'),
            ..Default::default()
        };

        let outcome = apply_filters(input, &predicates);
        assert_eq!(values(&outcome), vec!["Zebra", "fizz", "BUZZ"]);
        assert_eq!(outcome.applied.contains_character, Some('z'));
    }

    #[test]
    fn test_expanding_lowercase_compares_as_is() {
        // 'İ' lower-cases to two characters, so it only matches itself
        let input = records(&["İstanbul", "istanbul"]);
        let predicates = PredicateSet {
            contains_character: Some('İ'),
            ..Default::default()
        };

        let outcome = apply_filters(input, &predicates);
        assert_eq!(values(&outcome), vec!["İstanbul"]);
        assert_eq!(outcome.applied.contains_character, Some('İ'));
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let input = records(&["ccc", "a", "bb", "dddd"]);
        let predicates = PredicateSet {
            min_length: Some(2),
            ..Default::default()
        };

        assert_eq!(
            values(&apply_filters(input, &predicates)),
            vec!["ccc", "bb", "dddd"]
        );
    }

    #[test]
    fn test_conflicting_bounds_match_nothing() {
        let input = records(&["abc", "abcdef"]);
        let predicates = PredicateSet {
            min_length: Some(6),
            max_length: Some(3),
            ..Default::default()
        };

        assert!(apply_filters(input, &predicates).data.is_empty());
    }
}
